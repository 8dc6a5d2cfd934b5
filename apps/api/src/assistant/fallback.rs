//! Rule-based replies — the terminal stage of the assistant waterfall.
//!
//! Pure string matching over the lower-cased prompt. Groups are checked in
//! order and the first group with a matching keyword wins.

use async_trait::async_trait;

use crate::assistant::config::ResolverConfig;
use crate::assistant::stage::{AssistantStage, StageError};

/// Max characters of the prompt echoed back when nothing matches.
pub const ECHO_LIMIT: usize = 400;

struct KeywordGroup {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const GROUPS: &[KeywordGroup] = &[
    // creation
    KeywordGroup {
        keywords: &["créer", "creer", "nouveau"],
        reply: "Pour créer un nouveau CV, utilisez le bouton 'Créer un CV'.",
    },
    // skills
    KeywordGroup {
        keywords: &["compétence", "competence", "skill", "talent"],
        reply: "Compétences recommandées : React, Python, SQL, Gestion de projet, Communication.",
    },
    // export
    KeywordGroup {
        keywords: &["exporter", "export", "pdf"],
        reply: "Utilisez le bouton 'Exporter en PDF' depuis l'aperçu ou la carte du CV.",
    },
    // cover letter
    KeywordGroup {
        keywords: &["lettre", "motivation"],
        reply: "Cliquez sur 'Créer une lettre de motivation' pour générer une nouvelle lettre.",
    },
    // help
    KeywordGroup {
        keywords: &["aide", "help"],
        reply: "Je peux vous aider à : créer un CV, générer une lettre, exporter en PDF, ou ajouter des compétences.",
    },
];

/// Returns the canned reply for `prompt`. Total: never fails, never panics.
pub fn canned_reply(prompt: &str) -> String {
    let msg = prompt.to_lowercase();

    GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|k| msg.contains(k)))
        .map(|group| group.reply.to_string())
        .unwrap_or_else(|| not_understood(prompt))
}

fn not_understood(prompt: &str) -> String {
    format!(
        "Je ne suis pas sûr de comprendre votre question (« {} »). \
         Essayez : 'Créer un CV', 'Quelles compétences ajouter ?', 'Comment exporter en PDF ?'",
        truncate_chars(prompt.trim(), ECHO_LIMIT)
    )
}

/// Truncates on a char boundary, appending `...` when anything was cut.
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub struct RuleBasedStage;

#[async_trait]
impl AssistantStage for RuleBasedStage {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn is_enabled(&self, _config: &ResolverConfig) -> bool {
        true
    }

    async fn attempt(&self, prompt: &str, _config: &ResolverConfig) -> Result<String, StageError> {
        Ok(canned_reply(prompt))
    }
}
