//! Handles all user-facing output for the CLI.
//!
//! Rendered values go to stdout verbatim; the plugin listing is colorized
//! when stdout is a terminal.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::registry::PluginRegistry;

/// Prints a rendered value.
pub fn print_rendered(text: &str) {
    println!("{text}");
}

/// Prints one line per plugin: its name, then the classes it applies to.
pub fn print_plugins(registry: &PluginRegistry) -> std::io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for name in registry.list() {
        let Some(plugin) = registry.get(&name) else {
            continue;
        };
        let types: Vec<String> = plugin.types().iter().map(|t| t.qualified_name()).collect();

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stdout, "{name:<10}")?;
        stdout.reset()?;
        writeln!(stdout, " {}", types.join(", "))?;
    }
    Ok(())
}
