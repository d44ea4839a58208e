// src/renderer.rs

use crate::constants::{
    APP_NAME, HEADER_WIDTH, HEAVY_DOWN_AND_LEFT, HEAVY_DOWN_AND_RIGHT, HEAVY_HORIZONTAL,
    HEAVY_UP_AND_LEFT, HEAVY_UP_AND_RIGHT, HEAVY_VERTICAL, INITIAL_AI_MESSAGE,
};
use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::models::{Message, Recommendation, Role};
use chrono::Local;
use colored::Colorize;
use std::io::{self, Write};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// The display surface of the turn pipeline. Every method can fail; the
/// turn handler treats any failure as total for the turn.
pub trait Renderer {
    fn display_app_title(&mut self) -> ShopclerkResult<()>;
    fn display_initial_message(&mut self) -> ShopclerkResult<()>;
    fn display_user_message(&mut self, content: &str) -> ShopclerkResult<()>;
    fn display_recommendation(&mut self, recommendation: &Recommendation) -> ShopclerkResult<()>;
    fn display_conversation_log(&mut self, messages: &[Message]) -> ShopclerkResult<()>;
    fn display_error(&mut self, message: &str) -> ShopclerkResult<()>;
}

/// Renders to stdout with the heavy box-drawing product card.
pub struct TerminalRenderer {
    out: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer { out: io::stdout() }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        TerminalRenderer::new()
    }
}

impl Renderer for TerminalRenderer {
    fn display_app_title(&mut self) -> ShopclerkResult<()> {
        writeln!(self.out, "{}", format_title_banner().cyan().bold())
            .map_err(|e| ShopclerkError::render(format!("Failed to write title: {}", e)))
    }

    fn display_initial_message(&mut self) -> ShopclerkResult<()> {
        writeln!(self.out, "{}\n", INITIAL_AI_MESSAGE.green())
            .map_err(|e| ShopclerkError::render(format!("Failed to write greeting: {}", e)))
    }

    fn display_user_message(&mut self, content: &str) -> ShopclerkResult<()> {
        writeln!(self.out, "{} {}", "you ▸".yellow().bold(), content)
            .map_err(|e| ShopclerkError::render(format!("Failed to write user message: {}", e)))
    }

    fn display_recommendation(&mut self, recommendation: &Recommendation) -> ShopclerkResult<()> {
        writeln!(
            self.out,
            "{}\n{}",
            "clerk ▸".green().bold(),
            format_product_card(recommendation)
        )
        .map_err(|e| ShopclerkError::render(format!("Failed to write recommendation: {}", e)))
    }

    fn display_conversation_log(&mut self, messages: &[Message]) -> ShopclerkResult<()> {
        write!(self.out, "{}", format_conversation_log(messages)).map_err(|e| {
            ShopclerkError::conversation_log(format!("Failed to write conversation log: {}", e))
        })
    }

    fn display_error(&mut self, message: &str) -> ShopclerkResult<()> {
        writeln!(self.out, "{}", message.red())
            .map_err(|e| ShopclerkError::render(format!("Failed to write error surface: {}", e)))
    }
}

fn format_title_banner() -> String {
    let inner = HEADER_WIDTH - 2;
    let top = format!(
        "{}{}{}",
        HEAVY_DOWN_AND_RIGHT,
        HEAVY_HORIZONTAL.to_string().repeat(inner),
        HEAVY_DOWN_AND_LEFT
    );
    let bottom = format!(
        "{}{}{}",
        HEAVY_UP_AND_RIGHT,
        HEAVY_HORIZONTAL.to_string().repeat(inner),
        HEAVY_UP_AND_LEFT
    );
    let title = format!("{} — what can I find for you today?", APP_NAME);
    format!("{}\n{}\n{}", top, boxed_line(&title), bottom)
}

/// Plain-text product card. Kept free of colour codes so the width
/// arithmetic holds up.
pub fn format_product_card(recommendation: &Recommendation) -> String {
    let product = &recommendation.product;
    let inner = HEADER_WIDTH - 2;

    let mut lines = Vec::new();
    lines.push(format!(
        "{}{}{}",
        HEAVY_DOWN_AND_RIGHT,
        HEAVY_HORIZONTAL.to_string().repeat(inner),
        HEAVY_DOWN_AND_LEFT
    ));
    lines.push(boxed_line(&format!("{}  ({} yen)", product.name, product.price)));
    lines.push(boxed_line(&format!(
        "{} · {} · stock: {}",
        product.category, product.maker, product.stock
    )));
    for wrapped in wrap(&product.description, inner.saturating_sub(2)) {
        lines.push(boxed_line(&wrapped));
    }
    lines.push(format!(
        "{}{}{}",
        HEAVY_UP_AND_RIGHT,
        HEAVY_HORIZONTAL.to_string().repeat(inner),
        HEAVY_UP_AND_LEFT
    ));

    for wrapped in wrap(&recommendation.reason, HEADER_WIDTH) {
        lines.push(wrapped.to_string());
    }

    if !recommendation.alternatives.is_empty() {
        let names: Vec<&str> = recommendation
            .alternatives
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        lines.push(format!("Also worth a look: {}", names.join(", ")));
    }

    lines.join("\n")
}

/// The full transcript; a pure function of `messages`, so re-rendering an
/// unchanged session reproduces identical output.
pub fn format_conversation_log(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let stamp = message
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "clerk",
        };
        out.push_str(&format!("[{}] {} ▸ {}\n", stamp, speaker, message.content));
    }
    out
}

fn boxed_line(content: &str) -> String {
    let inner = HEADER_WIDTH - 2;
    let width = UnicodeWidthStr::width(content);
    let padding = inner.saturating_sub(width + 1);
    format!(
        "{} {}{}{}",
        HEAVY_VERTICAL,
        content,
        " ".repeat(padding),
        HEAVY_VERTICAL
    )
}
