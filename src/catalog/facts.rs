// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structured fact mining from overview pages
//!
//! The catalog pages publish key program data (director, contact email,
//! duration, weekly schedule) as free text. These are mined with regexes
//! over line-preserving extracted text and rendered back into the fragment
//! so relevance ranking and the completion prompt can use them.

use regex::Regex;

/// Facts mined from a program overview page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramFacts {
    pub director: Option<String>,
    pub subdirector: Option<String>,
    pub coordinador: Option<String>,
    pub email: Option<String>,
    /// Duration in years
    pub duracion_anios: Option<f32>,
    /// Total course load in hours
    pub carga_horaria: Option<u32>,
    /// "presencial" or "virtual"
    pub modalidad: Option<String>,
    /// Weekly schedule line, capped at 100 chars
    pub horario: Option<String>,
}

impl ProgramFacts {
    pub fn is_empty(&self) -> bool {
        *self == ProgramFacts::default()
    }
}

/// Mine program facts from line-preserving page text
pub fn mine_facts(text: &str) -> ProgramFacts {
    ProgramFacts {
        director: capture_after_label(text, "Directora?"),
        subdirector: capture_after_label(text, "Subdirectora?"),
        coordinador: capture_after_label(text, "Coordinadora?"),
        email: capture_email(text),
        duracion_anios: capture_years(text),
        carga_horaria: capture_hours(text),
        modalidad: detect_modalidad(text),
        horario: capture_horario(text),
    }
}

/// Render mined facts as a single normalized sentence block
pub fn render_facts(facts: &ProgramFacts) -> String {
    let mut parts = Vec::new();

    if let Some(ref v) = facts.director {
        parts.push(format!("Director/a: {}.", v));
    }
    if let Some(ref v) = facts.subdirector {
        parts.push(format!("Subdirector/a: {}.", v));
    }
    if let Some(ref v) = facts.coordinador {
        parts.push(format!("Coordinador/a: {}.", v));
    }
    if let Some(ref v) = facts.email {
        parts.push(format!("Correo de contacto: {}.", v));
    }
    if let Some(v) = facts.duracion_anios {
        parts.push(format!("Duración: {} años.", format_years(v)));
    }
    if let Some(v) = facts.carga_horaria {
        parts.push(format!("Carga horaria total: {} horas.", v));
    }
    if let Some(ref v) = facts.modalidad {
        parts.push(format!("Modalidad: {}.", v));
    }
    if let Some(ref v) = facts.horario {
        parts.push(format!("Horario de cursada: {}.", v));
    }

    parts.join(" ")
}

/// Capture the rest of a "Label: value" line
fn capture_after_label(text: &str, label_pattern: &str) -> Option<String> {
    let re = Regex::new(&format!(r"{}[:\s]+([A-ZÁ-Ú][^\n\r]{{2,80}})", label_pattern)).ok()?;
    let captured = re.captures(text)?.get(1)?.as_str();
    let cleaned = captured.trim().trim_end_matches('.').trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn capture_email(text: &str) -> Option<String> {
    let re = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").ok()?;
    Some(re.find(text)?.as_str().to_string())
}

fn capture_years(text: &str) -> Option<f32> {
    let re = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*años?").ok()?;
    let raw = re.captures(text)?.get(1)?.as_str().replace(',', ".");
    raw.parse().ok()
}

fn capture_hours(text: &str) -> Option<u32> {
    let re = Regex::new(r"(?i)(\d+)\s*horas?").ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn detect_modalidad(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if lower.contains("presencial") {
        Some("presencial".to_string())
    } else if lower.contains("virtual") || lower.contains("distancia") {
        Some("virtual".to_string())
    } else {
        None
    }
}

fn capture_horario(text: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)(lunes|martes|miércoles|jueves|viernes)[^\n\r]*(\d{1,2}:\d{2}|\d{1,2}\s*hs)[^\n\r]*",
    )
    .ok()?;
    let found = re.find(text)?.as_str().trim();
    let capped: String = found.chars().take(100).collect();
    Some(capped)
}

fn format_years(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as u32)
    } else {
        format!("{}", v)
    }
}
