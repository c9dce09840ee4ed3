use console::Style;

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn style_success() -> Style {
    Style::new().green()
}

pub fn style_error() -> Style {
    Style::new().red()
}

pub fn style_warn() -> Style {
    Style::new().yellow()
}

pub fn style_dim() -> Style {
    Style::new().dim()
}

// ── Messages ────────────────────────────────────────────────────────────────

/// Print an error to stderr with an optional hint.
pub fn print_error(msg: &str, hint: Option<&str>) {
    eprintln!("{} {}", style_error().apply_to("Error:"), msg);
    if let Some(hint) = hint {
        eprintln!("  {}", style_dim().apply_to(hint));
    }
}

/// Print a warning to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style_warn().apply_to("WARN:"), msg);
}
