//! Rendering of the ReShade header file.

use crate::cycle::TimeOfDay;

/// Render the `#define` block consumed by ReShade presets.
///
/// Byte-stable for equal inputs; the watch loop compares renders by
/// value to decide whether the file needs rewriting.
pub fn render_header(map_id: u32, tod: TimeOfDay, active: bool, utc_offset_secs: i32) -> String {
    format!(
        "#define GW2MapId {map_id}\n\
         #define GW2TOD {tod}\n\
         #define GW2Active {active}\n\
         #define TimeZone {utc_offset_secs}\n",
        tod = tod as u8,
        active = u8::from(active),
    )
}
