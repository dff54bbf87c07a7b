//! Output Formatting and Display Management
//!
//! Presents a merged report either as the full JSON document or as a colored
//! terminal summary.
//!
//! ## Summary Contents
//! - Input and output counts (reports, components, total usages)
//! - Usage per micro-frontend, with its share of the total
//! - Usage per application, when the application index is populated
//! - Top components and top props
//! - Unused component count

use crate::mfe_cache::ApplicationMfeCache;
use crate::models::{NamedCount, ReportData};
use colored::Colorize;

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_json(&self, report: &ReportData, pretty: bool) -> serde_json::Result<()> {
        let json_str = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        println!("{}", json_str);
        Ok(())
    }

    pub fn display_summary(
        &self,
        report: &ReportData,
        input_count: usize,
        applications: &ApplicationMfeCache,
    ) {
        let stats = &report.overall_stats;

        println!("\n{}", "=".repeat(80).bright_cyan());
        println!(
            "{}",
            "Component Usage Report - Merged (All Applications)"
                .bright_white()
                .bold()
        );
        println!("{}", "=".repeat(80).bright_cyan());

        println!(
            "\n{} {} reports • {} components • {} usages • {} unused\n",
            "📊".bright_yellow(),
            input_count.to_string().bright_white().bold(),
            report.component_stats.len().to_string().bright_white().bold(),
            stats.total_usages.to_string().bright_green().bold(),
            stats.total_unused_components.to_string().bright_red()
        );

        println!("{} Usage by micro-frontend:", "🧩".bright_blue());
        for (mfe, count) in &stats.mfe_usages {
            println!(
                "   {}: {} ({}%)",
                mfe.bright_cyan(),
                count.to_string().bright_green(),
                format!("{:.0}", percentage(*count, stats.total_usages)).bright_yellow()
            );
        }

        if applications.is_initialized() {
            let by_application = applications.usages_by_application(&stats.mfe_usages);
            println!("\n{} Usage by application:", "🏢".bright_blue());
            for application in applications.applications() {
                let count = by_application.get(application).copied().unwrap_or(0);
                let mfes = applications.mfes_for(application).unwrap_or_default();
                println!(
                    "   {}: {} ({} MFEs)",
                    application.bright_cyan(),
                    count.to_string().bright_green(),
                    mfes.len().to_string().bright_white()
                );
            }
        }

        self.display_ranking("🏆", "Most used components", &stats.most_used_components);
        self.display_ranking("🔧", "Most used props", &stats.most_used_props);
        println!();
    }

    fn display_ranking(&self, icon: &str, title: &str, entries: &[NamedCount]) {
        println!(
            "\n{} {} (top {}):",
            icon.bright_blue(),
            title,
            entries.len().to_string().bright_white().bold()
        );
        for (rank, entry) in entries.iter().enumerate() {
            println!(
                "   {:>2}. {}: {}",
                rank + 1,
                entry.name.bright_white(),
                entry.count.to_string().bright_green()
            );
        }
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        part as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}
