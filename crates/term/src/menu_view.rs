//! Menu screens: the title menu, boxed lists (save slots, settings pages) and the text prompt.
//!
//! Pure like [`crate::game_view`]; the caller owns the selection and input state.

use crate::fb::FrameBuffer;
use crate::game_view::Viewport;
use crate::theme::Theme;

const LOGO: [&str; 5] = [
    "█████ █████ █   █ █████",
    "    █ █   █ █   █ █   █",
    "█████ █   █ █████ █████",
    "█     █   █     █ █   █",
    "█████ █████     █ █████",
];

#[derive(Debug, Clone, Default)]
pub struct MenuView {
    theme: Theme,
}

impl MenuView {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Title screen: logo, a vertical list of items and a footer hint.
    pub fn render_title(
        &self,
        items: &[&str],
        selected: usize,
        footer: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.begin(viewport, fb);

        let logo_h = LOGO.len() as u16;
        let block_h = logo_h + 2 + items.len() as u16;
        let mut y = viewport.height.saturating_sub(block_h) / 2;

        if viewport.width as usize > LOGO[0].chars().count() {
            for line in LOGO {
                fb.put_str_centered(0, y, viewport.width, line, self.theme.accent);
                y += 1;
            }
        } else {
            fb.put_str_centered(0, y + logo_h / 2, viewport.width, "2048", self.theme.title);
            y += logo_h;
        }
        y += 2;

        self.draw_items(fb, items.iter().copied(), selected, y, viewport);
        self.draw_footer(fb, footer, viewport);
    }

    /// Boxed list with a heading, used by the slot picker and the settings pages.
    pub fn render_list(
        &self,
        heading: &str,
        items: &[String],
        selected: usize,
        footer: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.begin(viewport, fb);

        let inner = items
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(heading.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let w = (inner + 6).min(viewport.width);
        let h = items.len() as u16 + 4;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        fb.draw_box(x, y, w, h, self.theme.controls);
        fb.put_str_centered(x, y + 1, w, heading, self.theme.title);
        self.draw_items(fb, items.iter().map(String::as_str), selected, y + 3, viewport);
        self.draw_footer(fb, footer, viewport);
    }

    /// Single-line text input with a caret.
    pub fn render_prompt(
        &self,
        prompt: &str,
        input: &str,
        max_len: usize,
        footer: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.begin(viewport, fb);

        let field_w = max_len as u16 + 1;
        let w = (field_w.max(prompt.chars().count() as u16) + 4).min(viewport.width);
        let h = 5;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        fb.draw_box(x, y, w, h, self.theme.controls);
        fb.put_str_centered(x, y + 1, w, prompt, self.theme.title);

        let field_x = x + 2;
        fb.fill_rect(field_x, y + 3, field_w, 1, '_', self.theme.controls);
        let used = fb.put_str(field_x, y + 3, input, self.theme.text);
        fb.put_char(field_x + used, y + 3, '█', self.theme.accent);

        self.draw_footer(fb, footer, viewport);
    }

    fn begin(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.theme.text.into_cell(' '));
    }

    fn draw_items<'a>(
        &self,
        fb: &mut FrameBuffer,
        items: impl Iterator<Item = &'a str>,
        selected: usize,
        top: u16,
        viewport: Viewport,
    ) {
        for (i, item) in items.enumerate() {
            let y = top + i as u16;
            if i == selected {
                let label = format!("> {} <", item);
                fb.put_str_centered(0, y, viewport.width, &label, self.theme.highlight);
            } else {
                fb.put_str_centered(0, y, viewport.width, item, self.theme.text);
            }
        }
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, footer: &str, viewport: Viewport) {
        let y = viewport.height.saturating_sub(1);
        fb.put_str_centered(0, y, viewport.width, footer, self.theme.controls);
    }
}
