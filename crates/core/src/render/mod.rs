//! Output views over a parsed listing.
//!
//! - `locations`: raw, terse and JSON trap lists (`boundcheck`).
//! - `context`: trap lines with one line of surrounding source (`boundcheck` default).
//! - `annotated`: colored per-symbol disassembly grouped by source line (`disfunc`).
//!
//! Every view is deterministic: groupings go through explicit sorts or
//! `BTreeMap`s, never hash-map iteration order.

pub mod annotated;
pub mod context;
pub mod locations;

pub use annotated::render_annotated;
pub use context::render_context;
pub use locations::{render_json, render_raw, render_terse};

use owo_colors::{OwoColorize, Style};

/// What a piece of output represents, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Symbol,
    Source,
    Bracket,
    Call,
    TrapCall,
    Jump,
    Trap,
    Padding,
}

/// Maps roles to ANSI styles, or to nothing for plain output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colored: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

impl Palette {
    pub fn ansi() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn style(&self, role: Role) -> Option<Style> {
        if !self.colored {
            return None;
        }
        let style = match role {
            Role::Symbol => Style::new().bright_yellow(),
            Role::Source => Style::new().bright_yellow().bold(),
            Role::Bracket | Role::TrapCall => Style::new().red().bold(),
            Role::Call => Style::new().bright_green(),
            Role::Jump => Style::new().bright_blue(),
            Role::Trap => Style::new().bright_red(),
            Role::Padding => Style::new().bright_magenta(),
        };
        Some(style)
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        match self.style(role) {
            Some(style) => text.style(style).to_string(),
            None => text.to_string(),
        }
    }
}

/// Expand tabs to two spaces so source lines stay narrow.
pub fn shorten(line: &str) -> String {
    line.replace('\t', "  ")
}

/// Color each outermost `[...]` span of a source line.
///
/// Brackets inside single- or double-quoted literals are left alone; each quote
/// kind is ignored while inside the other. An unterminated span is colored up
/// to the end of the line.
pub fn highlight_brackets(line: &str, palette: &Palette) -> String {
    let mut out = String::with_capacity(line.len());
    let mut span = String::new();
    let mut in_quote = false;
    let mut in_double_quote = false;
    let mut depth = 0usize;

    for c in line.chars() {
        let quoted = in_quote || in_double_quote;
        match c {
            '[' if !quoted => depth += 1,
            '\'' if !in_double_quote => in_quote = !in_quote,
            '"' if !in_quote => in_double_quote = !in_double_quote,
            _ => {}
        }
        if depth > 0 {
            span.push(c);
        } else {
            out.push(c);
        }
        if c == ']' && !quoted && depth > 0 {
            depth -= 1;
            if depth == 0 {
                out.push_str(&palette.paint(Role::Bracket, &span));
                span.clear();
            }
        }
    }
    if !span.is_empty() {
        out.push_str(&palette.paint(Role::Bracket, &span));
    }
    out
}
