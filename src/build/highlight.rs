use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};

use crate::config::CodeConfig;
use crate::util::escape_attr;

/// A syntax highlighter using autumnus (tree-sitter based).
///
/// Code blocks are emitted with CSS classes; the light and dark theme
/// stylesheets are generated separately so the site can switch color
/// schemes without re-rendering.
pub struct SyntaxHighlighter {
    light_theme: String,
    dark_theme: String,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the given theme pair.
    pub fn new(config: &CodeConfig) -> Self {
        Self {
            light_theme: config.light.clone(),
            dark_theme: config.dark.clone(),
        }
    }

    /// Highlight code and return HTML with CSS classes.
    /// Returns the original code wrapped in a plain `<code>` if the language
    /// is not supported.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        // Language::guess handles detection from name or extension
        let lang = Language::guess(language, code);

        // Check if it's the Plaintext/unknown fallback
        if matches!(lang, Language::PlainText)
            && !language.is_empty()
            && language != "plaintext"
            && language != "text"
        {
            return Self::plain_code_block(code, language);
        }

        let formatter = HtmlLinkedBuilder::new().source(code).lang(lang).build();

        match formatter {
            Ok(f) => {
                let mut output: Vec<u8> = Vec::new();
                if f.format(&mut output).is_ok() {
                    String::from_utf8(output)
                        .unwrap_or_else(|_| Self::plain_code_block(code, language))
                } else {
                    Self::plain_code_block(code, language)
                }
            }
            Err(_) => Self::plain_code_block(code, language),
        }
    }

    /// Generate CSS for both themes.
    ///
    /// The light theme applies by default; the dark theme applies under
    /// the `.dark` root class the theme toggle sets.
    pub fn generate_css(&self) -> Option<String> {
        let light = themes::get(&self.light_theme).ok()?;
        let dark = themes::get(&self.dark_theme).ok()?;

        let mut css = light.css(false);
        css.push_str("\n.dark {\n");
        css.push_str(&dark.css(false));
        css.push_str("\n}\n");
        Some(css)
    }

    /// Create a plain code block without highlighting.
    fn plain_code_block(code: &str, language: &str) -> String {
        let escaped = escape_attr(code);
        if language.is_empty() {
            format!("<pre><code>{}</code></pre>", escaped)
        } else {
            format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_attr(language),
                escaped
            )
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(&CodeConfig::default())
    }
}
