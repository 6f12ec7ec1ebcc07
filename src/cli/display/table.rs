//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::RunReport;
use crate::infrastructure::applier::Manifest;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use std::path::PathBuf;

pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the objects of a run, one row per manifest
    pub fn render_manifests(&self, manifests: &[Manifest], applied: bool) -> String {
        if manifests.is_empty() {
            return "No resources rendered".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        let color = self.theme.get_apply_color(applied);
        for manifest in manifests {
            table.add_row(vec![
                Cell::new(&manifest.kind),
                Cell::new(manifest.namespace.as_deref().unwrap_or("-")).fg(self.theme.muted),
                Cell::new(&manifest.name),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_apply_icon(applied),
                    StatusIcon::get_status_text(applied)
                ))
                .fg(color),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Hub Resources {} ─╮\n",
            format!("[{} objects]", manifests.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    pub fn render_exported(&self, paths: &[PathBuf]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("EXPORTED FILE")]);

        for path in paths {
            table.add_row(vec![
                Cell::new(format!("{} {}", StatusIcon::FILE, path.display())).fg(self.theme.info)
            ]);
        }
        table.to_string()
    }

    pub fn render_report(&self, report: &RunReport) -> String {
        if !report.exported_templates.is_empty() {
            return self.render_exported(&report.exported_templates);
        }

        let mut output = self.render_manifests(&report.manifests, report.applied);
        if let Some(path) = &report.import_file {
            output.push_str(&format!(
                "\n{} Import file written to {}",
                StatusIcon::SUCCESS.green(),
                path.display()
            ));
        }
        output
    }
}
