//! Text reports for training runs

use std::fmt::Write;

use crate::Network;

/// Height of the loss plot in rows
const PLOT_HEIGHT: usize = 15;

/// Render per-epoch losses as an ASCII plot with a short summary
pub fn render_loss_curve(losses: &[f64]) -> String {
    let mut out = String::new();
    out.push_str("Training Loss Curve:\n");
    out.push_str("---------------------\n");

    let finite: Vec<f64> = losses.iter().copied().filter(|l| l.is_finite()).collect();
    if finite.is_empty() {
        out.push_str("No loss data available.\n");
        return out;
    }

    let min_loss = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max_loss = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max_loss - min_loss;

    let width = losses.len();
    let mut plot = vec![vec![' '; width]; PLOT_HEIGHT];

    for (i, &loss) in losses.iter().enumerate() {
        if !loss.is_finite() {
            continue;
        }
        let normalized = if range < 1e-12 { 0.5 } else { (loss - min_loss) / range };
        let row = ((1.0 - normalized) * (PLOT_HEIGHT - 1) as f64).round() as usize;
        plot[row.min(PLOT_HEIGHT - 1)][i] = '*';
    }

    for row in plot {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push_str("+\n");

    let _ = writeln!(out, "Min Loss: {:.6}, Max Loss: {:.6}", min_loss, max_loss);
    let _ = writeln!(out, "Epochs: 0 to {}", width - 1);
    if let Some(final_loss) = losses.last() {
        let _ = writeln!(out, "Final Loss: {:.6}", final_loss);
    }
    out
}

/// Tabular dump of both weight matrices, bias weights in the last column
pub fn render_weights(network: &Network) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Hidden weights ({} x {}):",
        network.hidden_count(),
        network.attribute_count() + 1
    );
    for (h, row) in network.hidden_weights().iter().enumerate() {
        let _ = writeln!(out, "  h{:<3}{}", h, format_row(row));
    }

    let _ = writeln!(
        out,
        "Output weights ({} x {}):",
        network.class_count(),
        network.hidden_count() + 1
    );
    for (o, row) in network.output_weights().iter().enumerate() {
        let _ = writeln!(out, "  o{:<3}{}", o, format_row(row));
    }
    out
}

fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(|w| format!("{:>10.4}", w))
        .collect::<Vec<_>>()
        .join(" ")
}
