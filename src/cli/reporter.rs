// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::BoxShape;
use crate::operator::CreatedBox;
use colored::*;
use nalgebra::Vector3;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the boxes placed for one scene
    pub fn report_scene(source: &str, created: &[CreatedBox], duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scene:".bold(), source.cyan());
        println!("{}", "━".repeat(80).bright_black());

        for created_box in created {
            Self::report_box(created_box);
        }

        println!(
            "\n  {} {}   {} {}",
            "Boxes:".bright_black(),
            created.len().to_string().cyan(),
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a single placed box
    pub fn report_box(created: &CreatedBox) {
        let description = &created.collision.description;
        println!(
            "\n{} {} {}",
            format!("[{}]", description.kind()).green().bold(),
            created.object.name.bold(),
            format!("in {}", created.object.collection).bright_black()
        );
        Self::print_vector("Center", &description.center.coords);
        Self::print_vector("Half-extents", &description.half_extents());

        if let BoxShape::Corners { frame, .. } = &description.shape {
            for (i, label) in ["Axis X", "Axis Y", "Axis Z"].iter().enumerate() {
                Self::print_vector(label, &frame.axis(i));
            }
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_vector(name: &str, v: &Vector3<f64>) {
        println!(
            "  {:<14} {}",
            format!("{}:", name).bright_black(),
            Self::format_vector(v).cyan()
        );
    }

    fn format_vector(v: &Vector3<f64>) -> String {
        format!("({:.5}, {:.5}, {:.5})", v.x, v.y, v.z)
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
