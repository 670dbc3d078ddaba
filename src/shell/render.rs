// imgtool/src/shell/render.rs
use crate::commands::{BatchRequest, PreviewRow, COMMANDS, FLAG_HELP};
use crate::core::RunSummary;
use crate::utils::format_file_size;
use console::{style, Term};
use std::path::Path;

const PREVIEW_LIMIT: usize = 20;

const EXAMPLES: [(&str, &str); 7] = [
    (
        "MAGIC: All-in-one (resize + remove colors + optimize)",
        "magic ./icons/*.png ./output 64 #FFFFFF,#000000 10",
    ),
    ("MAGIC: Single file only", "magic ./photo.png ./output 512 #FFFFFF 10"),
    ("Preview files before processing", "preview ./images/**/*.png"),
    ("Quick resize to 64x64", "resize ./icons/*.png ./output 64"),
    (
        "Quick remove white background",
        "remove-color ./images/*.png ./output #FFFFFF",
    ),
    (
        "Advanced: Resize with all options",
        "process --input ./icons/*.png --output ./output --size 48 --keep-aspect",
    ),
    (
        "Advanced: Remove multiple colors with tolerance",
        "process --input ./raw/*.png --output ./output --remove-color #FF00FF,#000000 --tolerance 10",
    ),
];

fn rule() -> String {
    style("=".repeat(60)).dim().to_string()
}

pub fn print_banner() {
    println!();
    println!("{}", style("  ImgTool").magenta().bold());
    println!("{}", rule());
    println!(
        "{} - Batch resize & remove colors\n",
        style("Interactive Image Processor").cyan().bold()
    );
    println!("{}", style("Tips for getting started").green().bold());
    println!("  1. Type {} for available commands", style("help").cyan());
    println!("  2. Type {} for usage examples", style("examples").cyan());
    println!("  3. Press {} for autocomplete", style("Tab").yellow());
    println!(
        "  4. Press {} to browse history",
        style("Up/Down").yellow()
    );
    println!();
}

pub fn print_help() {
    println!();
    println!("{}", style("Available Commands").magenta().bold());
    for (command, description) in COMMANDS {
        println!("  {:<20} {}", style(command).cyan(), description);
    }

    println!();
    println!("{}", style("Common Flags").yellow().bold());
    for (flag, description) in FLAG_HELP {
        println!("  {:<20} {}", style(flag).green(), description);
    }
    println!();
}

pub fn print_examples() {
    println!("\n{}\n", style("Usage Examples:").cyan().bold());
    for (i, (description, command)) in EXAMPLES.iter().enumerate() {
        println!("{}", style(format!("{}. {}", i + 1, description)).green());
        println!("   {}\n", style(command).yellow());
    }
}

pub fn clear_screen() {
    if let Err(e) = Term::stdout().clear_screen() {
        log::debug!("Could not clear screen: {}", e);
    }
}

pub fn print_no_matches(pattern: &str) {
    println!(
        "{} {}",
        style("! No files found matching:").yellow(),
        pattern
    );
}

pub fn print_preview(rows: &[PreviewRow]) {
    println!();
    println!("{}", style(format!("Found {} file(s)", rows.len())).bold());
    println!(
        "  {:<40} {:>12} {:>12}",
        style("File").cyan(),
        style("Size").green(),
        style("Dimensions").magenta()
    );

    for row in rows.iter().take(PREVIEW_LIMIT) {
        let name = row
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| row.path.display().to_string());
        let size = row
            .bytes
            .map(format_file_size)
            .unwrap_or_else(|| "?".to_string());
        let dimensions = row
            .dimensions
            .map(|(w, h)| format!("{}x{}", w, h))
            .unwrap_or_else(|| "?".to_string());
        println!("  {:<40} {:>12} {:>12}", name, size, dimensions);
    }

    if rows.len() > PREVIEW_LIMIT {
        println!(
            "  {:<40} {:>12} {:>12}",
            "...",
            format!("+ {} more", rows.len() - PREVIEW_LIMIT),
            "..."
        );
    }
    println!();
}

pub fn print_magic_banner() {
    println!("\n{}", style("* Magic processing...").magenta().bold());
}

pub fn print_config(request: &BatchRequest, file_count: usize) {
    let config = &request.config;

    println!("{}", style("Processing Configuration").bold());
    println!("  {} {}", style("Files found:").cyan(), file_count);
    match config.target_size {
        Some(size) => println!("  {} {}x{}", style("Target size:").cyan(), size, size),
        None => println!("  {} original", style("Target size:").cyan()),
    }
    if !config.colors_to_remove.is_empty() {
        let colors: Vec<String> = config.colors_to_remove.iter().map(|c| c.to_string()).collect();
        println!(
            "  {} {} (tolerance {})",
            style("Removing colors:").magenta(),
            colors.join(", "),
            config.tolerance
        );
    }
    if config.keep_aspect {
        println!("  {} Keep aspect ratio", style("Mode:").yellow());
    }
    println!();
}

pub fn print_summary(summary: &RunSummary, output_dir: &Path) {
    let title = if summary.interrupted {
        style("Interrupted").yellow().bold()
    } else {
        style("Complete").green().bold()
    };

    println!("{}", title);
    println!(
        "  {} {}/{} files",
        style("Success:").green(),
        summary.succeeded,
        summary.total_matched
    );
    if summary.skipped > 0 {
        println!(
            "  {} {} (destination exists)",
            style("Skipped:").yellow(),
            summary.skipped
        );
    }
    if summary.has_failures() {
        println!("  {} {}", style("Failed:").red(), summary.failed);
        for failure in &summary.failures {
            println!("    {} {}", style("X").red(), failure.message);
        }
    }
    if summary.interrupted {
        println!(
            "  {} {}",
            style("Not processed:").yellow(),
            summary.pending()
        );
    }
    println!("  {} {}", style("Output:").cyan(), output_dir.display());
    println!();
}

pub fn print_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", style("X Error:").red().bold(), error);
}

pub fn print_unknown_command(command: &str) {
    eprintln!(
        "\n{} {}",
        style("X Unknown command:").red(),
        style(command).bold()
    );
    eprintln!(
        "{}\n",
        style(format!("Type {} for available commands", style("help").green())).dim()
    );
}
