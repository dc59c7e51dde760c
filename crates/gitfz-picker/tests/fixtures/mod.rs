// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Shared fixtures: a scripted stand-in for fzf

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Picks line `@PICK@` (1-based) from stdin, writes it to a payload file the
/// way `fzf --print0` does and hands over to the enter binding through
/// `$SHELL -c`, exiting with its status like `become(...)`.
const FAKE_FZF: &str = r#"#!/bin/sh
pick=@PICK@
bind=""
for arg in "$@"; do
  case "$arg" in
    --bind=enter:become\(*\)) bind="$arg" ;;
  esac
done
tmp=$(mktemp)
tr '\n\000' '\036\n' | sed -n "${pick}p" | tr -d '\n' | tr '\036' '\n' > "$tmp"
printf '\000' >> "$tmp"
cmd=${bind#"--bind=enter:become("}
cmd=${cmd%")"}
cmd=$(printf '%s' "$cmd" | sed "s|{+f}|$tmp|")
"$SHELL" -c "$cmd"
status=$?
rm -f "$tmp"
exit $status
"#;

/// Script body of a picker that confirms line `pick`
pub fn fake_fzf(pick: usize) -> String {
    FAKE_FZF.replace("@PICK@", &pick.to_string())
}

/// Aborts immediately, like pressing Esc
pub const CANCEL_FZF: &str = "#!/bin/sh\ncat >/dev/null\nexit 130\n";

/// Write an executable script into `dir`
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("Failed to write script");
    std::fs::set_permissions(&path, Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
    path
}

/// A callback that records what fzf handed it into `out`
///
/// Writes `command`, a copy of the payload file as `payload`, and the raw
/// argv variable as `argv`.
pub fn recording_callback(dir: &Path, out: &Path) -> PathBuf {
    let body = format!(
        r#"#!/bin/sh
printf '%s' "$2" > '{out}/command'
payload=${{2#*::}}
cp "$payload" '{out}/payload'
printf '%s' "$__GITFZ_ARGV__" > '{out}/argv'
"#,
        out = out.display()
    );
    write_script(dir, "callback", &body)
}
