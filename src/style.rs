//! Caption style decoration.
//!
//! Pure text transforms applied once per caption: palette symbols for
//! meme and aesthetic styles, a small lexical substitution table for
//! formal captions on the simulated path, and the translation
//! annotation. Symbol choice is uniform over a fixed palette and goes
//! through a caller-supplied [`Rng`] so tests can pin determinism.

use rand::seq::SliceRandom;
use rand::Rng;

/// Caption styles selectable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionStyle {
    Funny,
    Casual,
    Formal,
    #[default]
    Meme,
    /// Only reachable through the continuous-video flow.
    Aesthetic,
}

impl CaptionStyle {
    /// Wire name as sent to the backend and shown in stream prefixes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Funny => "funny",
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Meme => "meme",
            Self::Aesthetic => "aesthetic",
        }
    }
}

impl std::str::FromStr for CaptionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "funny" => Ok(Self::Funny),
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            "meme" => Ok(Self::Meme),
            "aesthetic" => Ok(Self::Aesthetic),
            other => Err(format!("unknown caption style: {other}")),
        }
    }
}

impl std::fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appended to meme captions, one symbol per caption.
const MEME_PALETTE: [&str; 10] = ["😂", "💀", "🔥", "💯", "😎", "🤔", "👀", "📱", "💻", "🎮"];

/// Wrapped around aesthetic captions, same symbol on both sides.
const AESTHETIC_PALETTE: [&str; 10] = ["✨", "🌙", "💫", "🌸", "🦋", "🌟", "💎", "🔮", "🌺", "🍃"];

/// Lexical substitutions for formal captions on the simulated path.
const FORMAL_SUBSTITUTIONS: [(&str, &str); 2] = [("let's", "let us"), ("we will", "we shall")];

/// Which decoration rules are active.
///
/// The live backend path and the simulated path apply different rule
/// subsets for formal captions; the asymmetry is inherited behavior
/// and both rule sets are kept explicit rather than merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRules {
    /// Apply [`FORMAL_SUBSTITUTIONS`] to formal captions.
    pub formal_substitution: bool,
}

impl StyleRules {
    /// Rules for captions returned by a live backend.
    #[must_use]
    pub fn live() -> Self {
        Self {
            formal_substitution: false,
        }
    }

    /// Rules for locally simulated captions.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            formal_substitution: true,
        }
    }
}

/// Decorate one caption according to its style, then annotate the
/// translation when the input and output languages differ.
///
/// Funny and casual captions pass through unchanged. The translation
/// suffix always lands after any decoration.
pub fn apply_style<R: Rng + ?Sized>(
    text: &str,
    style: CaptionStyle,
    rules: StyleRules,
    from_lang: &str,
    to_lang: &str,
    rng: &mut R,
) -> String {
    let mut out = match style {
        CaptionStyle::Meme => {
            let symbol = MEME_PALETTE
                .choose(rng)
                .copied()
                .unwrap_or(MEME_PALETTE[0]);
            format!("{text} {symbol}")
        }
        CaptionStyle::Aesthetic => {
            let symbol = AESTHETIC_PALETTE
                .choose(rng)
                .copied()
                .unwrap_or(AESTHETIC_PALETTE[0]);
            format!("{symbol} {text} {symbol}")
        }
        CaptionStyle::Formal if rules.formal_substitution => {
            let mut t = text.to_string();
            for (from, to) in FORMAL_SUBSTITUTIONS {
                t = t.replace(from, to);
            }
            t
        }
        CaptionStyle::Funny | CaptionStyle::Casual | CaptionStyle::Formal => text.to_string(),
    };

    if from_lang != to_lang {
        out.push_str(&format!(" [Translated from {from_lang} to {to_lang}]"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_meme_appends_exactly_one_palette_symbol() {
        let out = apply_style("caption", CaptionStyle::Meme, StyleRules::live(), "en", "en", &mut rng());
        let suffix = out.strip_prefix("caption ").expect("space-separated suffix");
        assert!(MEME_PALETTE.contains(&suffix));
        assert_eq!(out.matches(suffix).count(), 1);
    }

    #[test]
    fn test_aesthetic_wraps_with_identical_symbol() {
        let out = apply_style("calm", CaptionStyle::Aesthetic, StyleRules::live(), "en", "en", &mut rng());
        let parts: Vec<&str> = out.splitn(2, ' ').collect();
        let symbol = parts[0];
        assert!(AESTHETIC_PALETTE.contains(&symbol));
        assert_eq!(out, format!("{symbol} calm {symbol}"));
    }

    #[test]
    fn test_formal_substitution_only_on_fallback_rules() {
        let text = "let's see what we will do";
        let live = apply_style(text, CaptionStyle::Formal, StyleRules::live(), "en", "en", &mut rng());
        assert_eq!(live, text);

        let fallback =
            apply_style(text, CaptionStyle::Formal, StyleRules::fallback(), "en", "en", &mut rng());
        assert_eq!(fallback, "let us see what we shall do");
    }

    #[test]
    fn test_funny_and_casual_are_identity() {
        for style in [CaptionStyle::Funny, CaptionStyle::Casual] {
            let out = apply_style("plain", style, StyleRules::fallback(), "en", "en", &mut rng());
            assert_eq!(out, "plain");
        }
    }

    #[test]
    fn test_translation_suffix_after_decoration() {
        let out = apply_style("hola", CaptionStyle::Meme, StyleRules::live(), "es", "en", &mut rng());
        assert!(out.ends_with(" [Translated from es to en]"));
        // Decoration precedes the suffix.
        let trimmed = out.strip_suffix(" [Translated from es to en]").unwrap();
        assert!(trimmed.starts_with("hola "));
    }

    #[test]
    fn test_same_language_has_no_suffix() {
        let out = apply_style("hi", CaptionStyle::Casual, StyleRules::live(), "en", "en", &mut rng());
        assert!(!out.contains("[Translated"));
    }

    #[test]
    fn test_style_round_trips_through_names() {
        for style in [
            CaptionStyle::Funny,
            CaptionStyle::Casual,
            CaptionStyle::Formal,
            CaptionStyle::Meme,
            CaptionStyle::Aesthetic,
        ] {
            assert_eq!(style.as_str().parse::<CaptionStyle>().unwrap(), style);
        }
        assert!("loud".parse::<CaptionStyle>().is_err());
    }
}
