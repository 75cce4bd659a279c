use indexmap::IndexMap;

/// Fixed display colors for well-known departments.
pub const DEPARTMENT_COLORS: &[(&str, &str)] = &[
    ("CSE", "#FF6B6B"),
    ("ECE", "#4ECDC4"),
    ("ME", "#45B7D1"),
    ("CE", "#96CEB4"),
    ("EE", "#FFEEAD"),
    ("IT", "#D4A5A5"),
    ("AI", "#9B59B6"),
    ("CS", "#3498DB"),
    ("CSBS", "#E74C3C"),
    ("AIML", "#2ECC71"),
    ("AIDS", "#F1C40F"),
    ("CSCE", "#1ABC9C"),
    ("CIVIL", "#E67E22"),
    ("MECH", "#34495E"),
    ("EEE", "#7F8C8D"),
    ("CSE-AI", "#16A085"),
    ("CSE-DS", "#D35400"),
    ("CSE-CS", "#8E44AD"),
    ("CSE-IT", "#27AE60"),
    ("CSE-AIML", "#C0392B"),
    ("CSE-AIDS", "#F39C12"),
    ("CSE-CSCE", "#2980B9"),
    ("Computer Science", "#FF6347"),
    ("Engineering", "#4682B4"),
    ("Business", "#32CD32"),
    ("Arts", "#FFD700"),
    ("Science", "#9370DB"),
];

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

fn known_color(department: &str) -> Option<&'static str> {
    DEPARTMENT_COLORS
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, color)| *color)
}

/// Assigns a color to each department, keeping the given order.
///
/// Unknown departments are spread around the hue circle by golden-ratio steps,
/// so the same department list always yields the same palette.
pub fn department_colors(departments: &[String]) -> IndexMap<String, String> {
    let mut colors = IndexMap::new();
    for dept in departments {
        if colors.contains_key(dept) {
            continue;
        }
        if let Some(color) = known_color(dept) {
            colors.insert(dept.clone(), color.to_string());
            continue;
        }
        let n = (colors.len() + 1) as f64;
        let hue = (n * GOLDEN_RATIO_CONJUGATE) % 1.0;
        let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.8);
        colors.insert(dept.clone(), to_hex(r, g, b));
    }
    colors
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn to_hex(r: f64, g: f64, b: f64) -> String {
    let channel = |c: f64| (c * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_departments_use_fixed_palette() {
        let colors = department_colors(&["ECE".to_string(), "CSE".to_string()]);
        assert_eq!(colors["ECE"], "#4ECDC4");
        assert_eq!(colors["CSE"], "#FF6B6B");
        assert_eq!(colors.keys().collect::<Vec<_>>(), vec!["ECE", "CSE"]);
    }

    #[test]
    fn test_unknown_department_gets_generated_color() {
        let colors = department_colors(&["Physics".to_string()]);
        // hue 0.618 lands in the blue sector, so blue is at full value
        let color = &colors["Physics"];
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert_eq!(color, &color.to_lowercase());
        assert_eq!(&color[5..7], "cc");
    }

    #[test]
    fn test_palette_is_deterministic() {
        let departments = vec!["Physics".to_string(), "CSE".to_string(), "Law".to_string()];
        assert_eq!(department_colors(&departments), department_colors(&departments));
        assert_ne!(
            department_colors(&departments)["Physics"],
            department_colors(&departments)["Law"]
        );
    }

    #[test]
    fn test_hsv_primary_sectors() {
        assert_eq!(to_hex(1.0, 0.0, 0.0), "#ff0000");
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
        let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);
    }
}
