//! Output formatting module

use serde::Serialize;

use crate::cli::OutputFormat;
use fueldip_app::app::CalcReport;
use fueldip_domain::service::Selection;
use fueldip_types::{Result, TankScope, WingSide};

/// Readings available under one calibration key
#[derive(Debug, Serialize)]
pub struct ReadingsView {
    pub stick: String,
    pub pitch: String,
    pub roll: f64,
    pub wing: WingSide,
    pub readings: Vec<f64>,
}

/// Everything the operator can pick from
#[derive(Debug, Serialize)]
pub struct OptionsView {
    pub pitches: Vec<String>,
    pub rolls: Vec<f64>,
    pub wing_sticks: Vec<String>,
    pub center_sticks: Vec<String>,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readings: Option<ReadingsView>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_calc(output_format: OutputFormat, report: &CalcReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    println!("\nFuel Quantity Indication Check");
    println!("==============================");
    println!(
        "Pitch: {}    Roll: {}",
        report.attitude.pitch, report.attitude.roll
    );
    println!("{}", "-".repeat(78));
    println!(
        "{:<11} {:<10} {:>7} {:>9} {:>9} {:<6} {:<12}",
        "Tank", "Stick", "Reading", "Qty (kg)", "Var (kg)", "Status", "Recommended"
    );
    println!("{}", "-".repeat(78));
    for tank in &report.tanks {
        let variance = tank
            .variance_kg
            .map(|v| format!("{:+.0}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<11} {:<10} {:>7} {:>9} {:>9} {:<6} {:<12}",
            tank.tank.label(),
            truncate_str(&tank.stick, 10),
            tank.reading,
            tank.quantity,
            variance,
            tank.status.label(),
            tank.recommended_stick.as_deref().unwrap_or("-"),
        );
        if let Some(ref diagnostic) = tank.diagnostic {
            println!("  ! {}", diagnostic);
        }
    }
    println!("{}", "-".repeat(78));
    println!("Total:   {} kg", report.summary.total);
    if report.summary.overall_alert {
        println!("CAUTION: estimate variance beyond tolerance - recheck tanks marked CHECK");
    }

    Ok(())
}

pub fn output_lookup(
    output_format: OutputFormat,
    stick: &str,
    pitch: &str,
    roll: f64,
    reading: f64,
    wing: WingSide,
    quantity: u32,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "stick": stick,
            "pitch": pitch,
            "roll": roll,
            "reading": reading,
            "wing_side": wing,
            "fuel_qty": quantity,
        }));
    }

    println!("{} / {} / {} / roll {} / reading {}", stick, pitch, wing, roll, reading);
    println!("Fuel quantity: {} kg", quantity);
    Ok(())
}

pub fn output_recommendation(
    output_format: OutputFormat,
    scope: TankScope,
    estimate: f64,
    stick: Option<&str>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "tank_scope": scope,
            "estimate_kg": estimate,
            "recommended_stick": stick,
        }));
    }

    match stick {
        Some(stick) => println!("{} at {} kg: use {}", scope, estimate, stick),
        None => println!("{} at {} kg: no recommendation", scope, estimate),
    }
    Ok(())
}

pub fn output_options(output_format: OutputFormat, view: &OptionsView) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(view);
    }

    println!("\nSelectable Options");
    println!("==================");
    println!("Pitches:        {}", view.pitches.join(", "));
    println!("Rolls:          {}", join_numbers(&view.rolls));
    println!("Wing sticks:    {}", view.wing_sticks.join(", "));
    println!("Center sticks:  {}", view.center_sticks.join(", "));
    println!("\nDefaults");
    println!("--------");
    println!("Pitch:          {}", view.selection.pitch.as_deref().unwrap_or("-"));
    println!(
        "Roll:           {}",
        view.selection
            .roll
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Wing stick:     {}", view.selection.wing_stick.as_deref().unwrap_or("-"));
    println!("Center stick:   {}", view.selection.center_stick.as_deref().unwrap_or("-"));

    if let Some(ref r) = view.readings {
        println!(
            "\nReadings for {} / {} / {} / roll {}:",
            r.stick, r.pitch, r.wing, r.roll
        );
        if r.readings.is_empty() {
            println!("  (none)");
        } else {
            println!("  {}", join_numbers(&r.readings));
        }
    }
    Ok(())
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
