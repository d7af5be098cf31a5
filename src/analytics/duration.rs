// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Format a millisecond duration as a human-readable clock string.
///
/// Produces `H:MM:SS` for durations of an hour or more, `M:SS` below that
/// (minutes unpadded). Absent and non-positive durations format as `"0:00"`.
pub fn format_duration(ms: Option<i64>) -> String {
    let ms = match ms {
        Some(value) if value > 0 => value,
        _ => return "0:00".to_string(),
    };

    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
