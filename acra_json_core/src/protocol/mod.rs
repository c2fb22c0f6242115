/*!
 * Protocol layer: what a crash report looks like on our side of the wire.
 *
 * - `fields`: the `ReportField` enumeration and the default field set
 * - `report`: `CrashReportData`, the assembled report handed in by the host
 * - `constants`: null sentinel, form parameter name, content types
 */

pub mod constants;
pub mod fields;
pub mod report;
