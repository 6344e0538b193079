//! G-code generation from ring toolpath plans.
//!
//! Motion emission is dialect independent: [`MotionState`] tracks the last
//! commanded X, Y and Z and only emits positioning moves that change
//! something. Dialects differ only in header, footer and comment syntax,
//! supplied by a [`PostProcessor`].
//!
//! Output is millimetres (`G21`), absolute (`G90`), one command per line,
//! lines joined with `\n` and no trailing newline.

use rosettecam_core::{ToolpathPlan, ToolpathSegment};
use rosettecam_devicedb::{GCodeDialect, GCodePostConfig};

/// Positions closer than this are treated as equal (mm).
pub const POSITION_TOLERANCE_MM: f64 = 1e-6;

/// Format a coordinate with four decimals, never printing `-0.0000`.
pub fn format_coord(value: f64) -> String {
    let s = format!("{:.4}", value);
    if s == "-0.0000" {
        "0.0000".to_string()
    } else {
        s
    }
}

fn format_feed(value: f64) -> String {
    format!("{:.1}", value)
}

/// Dialect-specific framing around the shared motion block.
pub trait PostProcessor {
    fn dialect(&self) -> GCodeDialect;

    /// Render a comment line.
    fn comment(&self, text: &str) -> String;

    /// Program preamble, ending with the move to safe Z.
    fn header(&self, plan: &ToolpathPlan, post: &GCodePostConfig) -> Vec<String>;

    /// Lines after the final retract: spindle stop, return to origin, program end.
    fn footer(&self, _plan: &ToolpathPlan, _post: &GCodePostConfig) -> Vec<String> {
        vec!["M5".to_string(), "G0 X0 Y0".to_string(), "M30".to_string()]
    }
}

/// GRBL-style output.
pub struct GenericPost;

impl PostProcessor for GenericPost {
    fn dialect(&self) -> GCodeDialect {
        GCodeDialect::Generic
    }

    fn comment(&self, text: &str) -> String {
        format!("; {}", text)
    }

    fn header(&self, plan: &ToolpathPlan, post: &GCodePostConfig) -> Vec<String> {
        vec![
            self.comment(&format!("Rosette ring {}", plan.ring_id)),
            self.comment(&format!("Segments: {}", plan.len())),
            "G21".to_string(),
            "G90".to_string(),
            "G17".to_string(),
            format!("T{} M6", post.tool_id),
            format!("M3 S{}", post.spindle_rpm),
            format!("G0 Z{}", format_coord(post.safe_z_mm)),
        ]
    }
}

/// FANUC-style output: optional `O####` line, parenthesised upper-case
/// comments, tool change ahead of the modal setup.
pub struct FanucPost;

impl PostProcessor for FanucPost {
    fn dialect(&self) -> GCodeDialect {
        GCodeDialect::Fanuc
    }

    fn comment(&self, text: &str) -> String {
        // parentheses cannot nest in FANUC comments
        let cleaned: String = text
            .chars()
            .filter(|c| *c != '(' && *c != ')')
            .collect();
        format!("({})", cleaned.to_uppercase())
    }

    fn header(&self, plan: &ToolpathPlan, post: &GCodePostConfig) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(program) = post.program_number {
            lines.push(format!("O{:04}", program));
        }
        lines.push(self.comment(&format!("Rosette ring {}", plan.ring_id)));
        lines.push(self.comment(&format!("Segments {}", plan.len())));
        lines.push(format!("T{} M6", post.tool_id));
        lines.push("G21".to_string());
        lines.push("G90".to_string());
        lines.push("G17".to_string());
        lines.push(format!("S{} M3", post.spindle_rpm));
        lines.push(format!("G0 Z{}", format_coord(post.safe_z_mm)));
        lines
    }

    fn footer(&self, plan: &ToolpathPlan, _post: &GCodePostConfig) -> Vec<String> {
        vec![
            self.comment(&format!("End rosette ring {}", plan.ring_id)),
            "M5".to_string(),
            "G0 X0 Y0".to_string(),
            "M30".to_string(),
        ]
    }
}

/// Post-processor for a dialect.
pub fn post_processor_for(dialect: GCodeDialect) -> &'static dyn PostProcessor {
    match dialect {
        GCodeDialect::Generic => &GenericPost,
        GCodeDialect::Fanuc => &FanucPost,
    }
}

/// Last commanded tool position. X and Y are unknown until the first rapid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: f64,
    safe_z: f64,
}

impl MotionState {
    pub fn new(safe_z: f64) -> Self {
        Self {
            x: None,
            y: None,
            z: safe_z,
            safe_z,
        }
    }

    fn at_xy(&self, x: f64, y: f64) -> bool {
        match (self.x, self.y) {
            (Some(cx), Some(cy)) => {
                (cx - x).abs() <= POSITION_TOLERANCE_MM && (cy - y).abs() <= POSITION_TOLERANCE_MM
            }
            _ => false,
        }
    }

    fn at_z(&self, z: f64) -> bool {
        (self.z - z).abs() <= POSITION_TOLERANCE_MM
    }

    /// Retract to safe Z unless already there.
    pub fn retract(&mut self, lines: &mut Vec<String>) {
        if !self.at_z(self.safe_z) {
            lines.push(format!("G0 Z{}", format_coord(self.safe_z)));
            self.z = self.safe_z;
        }
    }

    /// Emit the moves for one segment.
    pub fn cut(&mut self, seg: &ToolpathSegment, lines: &mut Vec<String>) {
        self.retract(lines);

        if !self.at_xy(seg.x_start_mm, seg.y_start_mm) {
            lines.push(format!(
                "G0 X{} Y{}",
                format_coord(seg.x_start_mm),
                format_coord(seg.y_start_mm)
            ));
            self.x = Some(seg.x_start_mm);
            self.y = Some(seg.y_start_mm);
        }

        if !self.at_z(seg.z_start_mm) {
            lines.push(format!(
                "G1 Z{} F{}",
                format_coord(seg.z_start_mm),
                format_feed(seg.feed_mm_min)
            ));
            self.z = seg.z_start_mm;
        }

        lines.push(format!(
            "G1 X{} Y{} Z{} F{}",
            format_coord(seg.x_end_mm),
            format_coord(seg.y_end_mm),
            format_coord(seg.z_end_mm),
            format_feed(seg.feed_mm_min)
        ));
        self.x = Some(seg.x_end_mm);
        self.y = Some(seg.y_end_mm);
        self.z = seg.z_end_mm;
    }
}

/// Render a plan as G-code text for the post's dialect.
pub fn generate_gcode_from_toolpaths(plan: &ToolpathPlan, post: &GCodePostConfig) -> String {
    let processor = post_processor_for(post.dialect);
    let mut lines = processor.header(plan, post);

    let mut state = MotionState::new(post.safe_z_mm);
    for seg in &plan.segments {
        state.cut(seg, &mut lines);
    }
    state.retract(&mut lines);

    lines.extend(processor.footer(plan, post));
    tracing::debug!(
        ring_id = plan.ring_id,
        dialect = %processor.dialect(),
        lines = lines.len(),
        "generated G-code"
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(i: usize, s: (f64, f64, f64), e: (f64, f64, f64)) -> ToolpathSegment {
        ToolpathSegment::new(i, s, e, 600.0)
    }

    fn count_rapids_to(gcode: &str, x: f64, y: f64) -> usize {
        let target = format!("G0 X{} Y{}", format_coord(x), format_coord(y));
        gcode.lines().filter(|l| *l == target).count()
    }

    #[test]
    fn test_format_coord_suppresses_negative_zero() {
        assert_eq!(format_coord(-1e-12), "0.0000");
        assert_eq!(format_coord(-1.25), "-1.2500");
        assert_eq!(format_coord(31.819805153), "31.8198");
    }

    #[test]
    fn test_single_segment_sequence() {
        let plan = ToolpathPlan::new(2, vec![seg(0, (10.0, 0.0, -1.0), (0.0, 10.0, -1.0))]);
        let gcode = generate_gcode_from_toolpaths(&plan, &GCodePostConfig::default());
        let lines: Vec<&str> = gcode.lines().collect();
        let motion_start = lines.iter().position(|l| *l == "G0 Z5.0000").unwrap();
        assert_eq!(
            &lines[motion_start..],
            &[
                "G0 Z5.0000",
                "G0 X10.0000 Y0.0000",
                "G1 Z-1.0000 F600.0",
                "G1 X0.0000 Y10.0000 Z-1.0000 F600.0",
                "G0 Z5.0000",
                "M5",
                "G0 X0 Y0",
                "M30",
            ]
        );
    }

    #[test]
    fn test_shared_endpoint_skips_rapid() {
        let plan = ToolpathPlan::new(
            1,
            vec![
                seg(0, (10.0, 0.0, -1.0), (0.0, 10.0, -1.0)),
                seg(1, (0.0, 10.0, -1.0), (-10.0, 0.0, -1.0)),
            ],
        );
        let gcode = generate_gcode_from_toolpaths(&plan, &GCodePostConfig::default());
        assert_eq!(count_rapids_to(&gcode, 10.0, 0.0), 1);
        assert_eq!(count_rapids_to(&gcode, 0.0, 10.0), 0);
        // retract and re-plunge still happen between segments
        assert_eq!(
            gcode.lines().filter(|l| *l == "G1 Z-1.0000 F600.0").count(),
            2
        );
    }

    #[test]
    fn test_identical_start_points_rapid_once() {
        let plan = ToolpathPlan::new(
            1,
            vec![
                seg(0, (5.0, 5.0, -1.0), (5.0, 5.0, -1.0)),
                seg(1, (5.0, 5.0, -1.0), (9.0, 5.0, -1.0)),
            ],
        );
        let gcode = generate_gcode_from_toolpaths(&plan, &GCodePostConfig::default());
        assert_eq!(count_rapids_to(&gcode, 5.0, 5.0), 1);
    }

    #[test]
    fn test_sub_tolerance_difference_is_same_position() {
        let plan = ToolpathPlan::new(
            1,
            vec![
                seg(0, (0.0, 0.0, -1.0), (1.0, 1.0, -1.0)),
                seg(1, (1.0 + 5e-7, 1.0, -1.0), (2.0, 2.0, -1.0)),
            ],
        );
        let gcode = generate_gcode_from_toolpaths(&plan, &GCodePostConfig::default());
        assert_eq!(gcode.lines().filter(|l| l.starts_with("G0 X")).count(), 2);
    }

    #[test]
    fn test_segment_at_safe_z_does_not_plunge_or_retract() {
        let plan = ToolpathPlan::new(1, vec![seg(0, (1.0, 1.0, 5.0), (2.0, 2.0, 5.0))]);
        let gcode = generate_gcode_from_toolpaths(&plan, &GCodePostConfig::default());
        assert!(!gcode.contains("G1 Z"));
        assert_eq!(gcode.lines().filter(|l| *l == "G0 Z5.0000").count(), 1);
    }

    #[test]
    fn test_generic_header() {
        let gcode =
            generate_gcode_from_toolpaths(&ToolpathPlan::empty(4), &GCodePostConfig::default());
        let lines: Vec<&str> = gcode.lines().collect();
        assert_eq!(
            lines,
            vec![
                "; Rosette ring 4",
                "; Segments: 0",
                "G21",
                "G90",
                "G17",
                "T1 M6",
                "M3 S18000",
                "G0 Z5.0000",
                "M5",
                "G0 X0 Y0",
                "M30",
            ]
        );
        assert!(!gcode.ends_with('\n'));
    }

    #[test]
    fn test_fanuc_framing() {
        let post = GCodePostConfig {
            dialect: GCodeDialect::Fanuc,
            program_number: Some(42),
            tool_id: 3,
            ..Default::default()
        };
        let gcode = generate_gcode_from_toolpaths(&ToolpathPlan::empty(4), &post);
        let lines: Vec<&str> = gcode.lines().collect();
        assert_eq!(lines[0], "O0042");
        assert_eq!(lines[1], "(ROSETTE RING 4)");
        assert_eq!(lines[3], "T3 M6");
        assert!(lines.contains(&"S18000 M3"));
        assert!(!gcode.contains(';'));
        assert!(gcode.ends_with("M30"));
    }

    #[test]
    fn test_fanuc_without_program_number() {
        let post = GCodePostConfig {
            dialect: GCodeDialect::Fanuc,
            ..Default::default()
        };
        let gcode = generate_gcode_from_toolpaths(&ToolpathPlan::empty(4), &post);
        assert!(gcode.starts_with("(ROSETTE RING 4)"));
        assert!(!gcode.lines().any(|l| l.starts_with('O')));
    }

    #[test]
    fn test_motion_identical_across_dialects() {
        let plan = ToolpathPlan::new(
            1,
            vec![
                seg(0, (10.0, 0.0, -1.0), (0.0, 10.0, -1.0)),
                seg(1, (0.0, 10.0, -1.0), (-10.0, 0.0, -1.0)),
            ],
        );
        let motion = |d: GCodeDialect| -> Vec<String> {
            let post = GCodePostConfig {
                dialect: d,
                ..Default::default()
            };
            generate_gcode_from_toolpaths(&plan, &post)
                .lines()
                .filter(|l| l.starts_with("G0 X") || l.starts_with("G1"))
                .map(str::to_string)
                .collect()
        };
        assert_eq!(motion(GCodeDialect::Generic), motion(GCodeDialect::Fanuc));
    }

    #[test]
    fn test_fanuc_comment_strips_parentheses() {
        assert_eq!(FanucPost.comment("ring (outer)"), "(RING OUTER)");
    }
}
