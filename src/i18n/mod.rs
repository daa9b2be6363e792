//! Locales: month names and interface labels

use serde::Serialize;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese
    #[default]
    PtBr,
    /// US English
    EnUs,
}

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const EN_US_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// Parse a language tag such as `pt-BR`, `pt_br` or `en`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Some(Locale::PtBr),
            "en-us" | "en" => Some(Locale::EnUs),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    /// Abbreviated month name for a 1-based month
    pub fn month_abbrev(&self, month: u32) -> &'static str {
        let names = match self {
            Locale::PtBr => &PT_BR_MONTHS,
            Locale::EnUs => &EN_US_MONTHS,
        };
        month
            .checked_sub(1)
            .and_then(|index| names.get(index as usize))
            .copied()
            .unwrap_or("")
    }

    /// Word joining a date and a time of day
    pub fn time_connector(&self) -> &'static str {
        match self {
            Locale::PtBr => "às",
            Locale::EnUs => "at",
        }
    }

    /// Interface labels for templates
    pub fn labels(&self) -> Labels {
        match self {
            Locale::PtBr => Labels {
                load_more: "Carregar mais posts",
                previous_post: "Post anterior",
                next_post: "Próximo post",
                edited: "* editado em",
                exit_preview: "Sair do modo Preview",
                not_found: "Post não encontrado",
                could_not_load: "Não foi possível carregar o conteúdo",
                minutes: "min",
            },
            Locale::EnUs => Labels {
                load_more: "Load more posts",
                previous_post: "Previous post",
                next_post: "Next post",
                edited: "* edited on",
                exit_preview: "Exit preview mode",
                not_found: "Post not found",
                could_not_load: "Could not load content",
                minutes: "min",
            },
        }
    }
}

/// Interface strings of one locale
#[derive(Debug, Clone, Serialize)]
pub struct Labels {
    pub load_more: &'static str,
    pub previous_post: &'static str,
    pub next_post: &'static str,
    pub edited: &'static str,
    pub exit_preview: &'static str,
    pub not_found: &'static str,
    pub could_not_load: &'static str,
    pub minutes: &'static str,
}
