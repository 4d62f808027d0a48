// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Grounded prompt composition
//!
//! Builds the completion prompt from the question plus the selected
//! catalog fragments, bounded by a character budget.

use crate::catalog::ContentFragment;

/// System prompt for the completion call
pub const SYSTEM_PROMPT: &str = "Sos un asistente experto en los posgrados de la Facultad de \
    Derecho de la UBA. Respondés de forma clara, precisa y estructurada.";

/// General contact address included when no specific contact is available
pub const CONTACT_EMAIL: &str = "inscripcionesposgrado@derecho.uba.ar";

/// Minimum budget left for a fragment to still be worth including
const MIN_FRAGMENT_CHARS: usize = 200;

/// Build the user prompt for a question and its grounding fragments
///
/// With no matching fragments the prompt asks for a general answer and
/// points at the graduate office. With fragments, each is rendered as a
/// titled context block until `max_context_chars` is spent.
pub fn build_prompt(
    question: &str,
    fragments: &[&ContentFragment],
    max_context_chars: usize,
) -> String {
    if fragments.is_empty() {
        return format!(
            "Sos un asistente especializado en los posgrados de la Facultad de Derecho de la UBA.\n\n\
            Pregunta del usuario: {question}\n\n\
            Respondé de forma clara y precisa. Si no tenés información específica sobre lo que \
            pregunta, indicalo claramente y sugerí contactar a la Dirección de Posgrado.\n\n\
            Email general de Posgrado: {CONTACT_EMAIL}\n"
        );
    }

    let mut context = String::new();
    let mut used = 0usize;

    for fragment in fragments {
        let remaining = max_context_chars.saturating_sub(used);
        if remaining < MIN_FRAGMENT_CHARS {
            break;
        }

        let excerpt = bounded_excerpt(&fragment.text, remaining);
        used += excerpt.len();

        context.push_str(&format!(
            "**{}** ({})\n{}\n\n",
            fragment.title, fragment.url, excerpt
        ));
    }

    format!(
        "Sos un asistente especializado en los posgrados de la Facultad de Derecho de la UBA.\n\n\
        INFORMACIÓN DEL CATÁLOGO CONSULTADO:\n\n\
        {context}\
        ---\n\n\
        PREGUNTA DEL USUARIO: {question}\n\n\
        INSTRUCCIONES:\n\
        1. Respondé usando SOLO la información que te proporcioné arriba\n\
        2. Sé específico: citá carga horaria, nombres de materias y contactos cuando aparezcan\n\
        3. Si el usuario pregunta algo que NO está en los datos, decilo claramente\n\
        4. Formato: claro, estructurado, con viñetas cuando corresponda\n\
        5. Incluí siempre al final el email de contacto relevante (o {CONTACT_EMAIL})\n\n\
        Respondé ahora de forma directa y útil:"
    )
}

/// Cut text to at most `max_chars`, on a word boundary
fn bounded_excerpt(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_string();
    }

    let mut cut = max_chars;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }

    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
