//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state (and the transient banners/popups raised by game events) into
//! terminal commands.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, PI};
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kamikaze_furry::constants::{FINAL_LEVEL, WORLD_HEIGHT, WORLD_WIDTH};
use kamikaze_furry::entities::{GameEvent, GameState, Lifecycle, ProjectileOwner};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Cyan;
const C_HUD_HIGH: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY_HEAD: Color = Color::Yellow;
const C_ENEMY_BODY: Color = Color::Green;
const C_SPIDER: Color = Color::Magenta;
const C_BOSS: Color = Color::Red;
const C_BOSS_FLASH: Color = Color::DarkRed;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_SHOT_BOSS: Color = Color::Red;
const C_POPUP: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Frames a banner stays on screen.
const BANNER_FRAMES: u32 = 120;
/// Frames a score popup drifts upward before vanishing.
const POPUP_FRAMES: u32 = 45;
/// Frames the boss is drawn dimmed after being hit.
const FLASH_FRAMES: u32 = 6;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates onto the bordered play area.
///
/// Row 0 is the HUD, row 1 and row `height - 2` are the border, the last
/// row holds the controls hint. Columns 0 and `width - 1` are the walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    fn cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a world position, `None` when off screen.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..WORLD_WIDTH).contains(&x) || !(0.0..WORLD_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / WORLD_WIDTH * self.cols()) as u16;
        let row = 2 + (y / WORLD_HEIGHT * self.rows()) as u16;
        Some((col, row))
    }

    /// World position at the centre of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        let x = (col as f32 - 0.5) / self.cols() * WORLD_WIDTH;
        let y = (row as f32 - 1.5) / self.rows() * WORLD_HEIGHT;
        (x.clamp(0.0, WORLD_WIDTH), y.clamp(0.0, WORLD_HEIGHT))
    }
}

// ── Transient presentation state ──────────────────────────────────────────────

struct Banner {
    title: String,
    subtitle: Option<&'static str>,
    color: Color,
    frames: u32,
}

struct Popup {
    text: String,
    x: f32,
    y: f32,
    frames: u32,
}

/// Banners, score popups and the boss hit flash, fed by game events.
#[derive(Default)]
pub struct Overlay {
    banners: VecDeque<Banner>,
    popups: Vec<Popup>,
    boss_flash: u32,
}

impl Overlay {
    pub fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BossIncoming => self.banner("BOSS INCOMING!".into(), None, Color::Red),
                GameEvent::BossDefeated { .. } => {
                    self.banner("BOSS DEFEATED!".into(), None, Color::Green)
                }
                GameEvent::LevelChanged { level, boss_level } => {
                    let subtitle = if *boss_level { "Boss Level!" } else { "Get Ready!" };
                    self.banner(format!("Level {level}"), Some(subtitle), Color::Cyan);
                }
                GameEvent::ScorePopup { amount, x, y } => self.popups.push(Popup {
                    text: format!("+{amount}"),
                    x: *x,
                    y: *y,
                    frames: POPUP_FRAMES,
                }),
                GameEvent::BossHit { .. } => self.boss_flash = FLASH_FRAMES,
                _ => {}
            }
        }
    }

    fn banner(&mut self, title: String, subtitle: Option<&'static str>, color: Color) {
        self.banners.push_back(Banner {
            title,
            subtitle,
            color,
            frames: BANNER_FRAMES,
        });
    }

    /// Advance every fade by one frame.
    pub fn age(&mut self) {
        if let Some(front) = self.banners.front_mut() {
            front.frames = front.frames.saturating_sub(1);
            if front.frames == 0 {
                self.banners.pop_front();
            }
        }
        for popup in &mut self.popups {
            popup.frames = popup.frames.saturating_sub(1);
            popup.y -= 1.0;
        }
        self.popups.retain(|p| p.frames > 0);
        self.boss_flash = self.boss_flash.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    overlay: &Overlay,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    if state.lifecycle == Lifecycle::Idle {
        draw_title(out, state, view)?;
    } else {
        draw_entities(out, state, overlay, view)?;
        draw_popups(out, overlay, view)?;
        if let Some(banner) = overlay.banners.front() {
            draw_banner(out, banner, view)?;
        }
        match state.lifecycle {
            Lifecycle::Paused => {
                draw_box(out, view, &[("PAUSED", Color::Cyan), ("P - Resume", Color::White)])?
            }
            Lifecycle::GameOver => draw_game_over(out, state, view)?,
            Lifecycle::Won => draw_victory(out, state, view)?,
            _ => {}
        }
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score:{:>7}  Level:{:>3}",
        state.score, state.level
    )))?;

    if state.high_score > 0 {
        out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
        out.queue(Print(format!("  Hi:{:>7}", state.high_score)))?;
    }

    // Boss health bar, right side
    if let Some(boss) = &state.boss {
        const BAR: usize = 20;
        let filled = (boss.health as usize * BAR).div_ceil(boss.max_health.max(1) as usize);
        let bar = format!(
            "BOSS [{}{}]",
            "█".repeat(filled),
            "░".repeat(BAR.saturating_sub(filled))
        );
        let x = view.width.saturating_sub(bar.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_BOSS))?;
        out.queue(Print(bar))?;
    }

    Ok(())
}

// ── Title screen ──────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let high = format!("High Score: {}", state.high_score);
    let lines: [(&str, Color); 5] = [
        ("KAMIKAZE FURRY", Color::White),
        ("", Color::White),
        ("Press SPACE to Start", Color::Cyan),
        ("", Color::White),
        (high.as_str(), Color::White),
    ];
    draw_lines(out, view, &lines)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entities<W: Write>(
    out: &mut W,
    state: &GameState,
    overlay: &Overlay,
    view: Viewport,
) -> std::io::Result<()> {
    for (i, enemy) in state.enemies.iter().enumerate() {
        let (glyph, color) = if i == 0 {
            ("◉", C_ENEMY_HEAD)
        } else {
            ("●", C_ENEMY_BODY)
        };
        put(out, view, enemy.x, enemy.y, glyph, color)?;
    }

    for spider in &state.spiders {
        put(out, view, spider.x, spider.y, "ж", C_SPIDER)?;
    }

    if let Some(boss) = &state.boss {
        let color = if overlay.boss_flash > 0 {
            C_BOSS_FLASH
        } else {
            C_BOSS
        };
        if let Some((col, row)) = view.to_cell(boss.x, boss.y) {
            let left = col.saturating_sub(2).max(1);
            for (dy, part) in ["/≡≡≡\\", "<◉█◉>", "\\╨╨╨/"].iter().enumerate() {
                let r = (row + dy as u16).saturating_sub(1);
                if r >= 2 && r < view.height.saturating_sub(2) {
                    out.queue(cursor::MoveTo(left, r))?;
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(*part))?;
                }
            }
        }
    }

    for shot in &state.projectiles {
        let (glyph, color) = match shot.owner {
            ProjectileOwner::Player => ("•", C_SHOT_PLAYER),
            ProjectileOwner::Enemy => ("∗", C_SHOT_ENEMY),
            ProjectileOwner::Boss => ("o", C_SHOT_BOSS),
        };
        put(out, view, shot.x, shot.y, glyph, color)?;
    }

    if let Some(player) = &state.player {
        put(out, view, player.x, player.y, facing_glyph(player.facing), C_PLAYER)?;
    }

    Ok(())
}

/// Arrow pointing the way the ship faces.
fn facing_glyph(facing: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"];
    let octant = ((facing + PI) / FRAC_PI_4).round() as i32;
    ARROWS[octant.rem_euclid(8) as usize]
}

fn put<W: Write>(
    out: &mut W,
    view: Viewport,
    x: f32,
    y: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_popups<W: Write>(out: &mut W, overlay: &Overlay, view: Viewport) -> std::io::Result<()> {
    for popup in &overlay.popups {
        put(out, view, popup.x, popup.y, &popup.text, C_POPUP)?;
    }
    Ok(())
}

// ── Banners and overlays ──────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, banner: &Banner, view: Viewport) -> std::io::Result<()> {
    match banner.subtitle {
        Some(subtitle) => draw_lines(
            out,
            view,
            &[(banner.title.as_str(), banner.color), (subtitle, Color::White)],
        ),
        None => draw_lines(out, view, &[(banner.title.as_str(), banner.color)]),
    }
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let level = format!("Final Level: {}", state.level);
    let score = format!("Final Score: {}", state.score);
    draw_box(
        out,
        view,
        &[
            ("GAME OVER", Color::Red),
            (level.as_str(), Color::Red),
            (score.as_str(), Color::Red),
            ("R - Restart  Q - Quit", Color::White),
        ],
    )
}

fn draw_victory<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let levels = format!("You completed all {FINAL_LEVEL} levels!");
    let score = format!("Final Score: {}", state.score);
    draw_box(
        out,
        view,
        &[
            ("CONGRATULATIONS!", Color::Green),
            (levels.as_str(), Color::Green),
            (score.as_str(), Color::Green),
            ("R - Restart  Q - Quit", Color::White),
        ],
    )
}

/// Centred lines inside a frame.
fn draw_box<W: Write>(out: &mut W, view: Viewport, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|(text, _)| text.chars().count())
        .max()
        .unwrap_or(0)
        + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let bottom = format!("╚{}╝", "═".repeat(inner));
    let padded: Vec<String> = lines
        .iter()
        .map(|(text, _)| format!("║{:^inner$}║", text))
        .collect();

    let mut framed: Vec<(&str, Color)> = vec![(top.as_str(), Color::DarkGrey)];
    framed.extend(padded.iter().zip(lines).map(|(p, (_, c))| (p.as_str(), *c)));
    framed.push((bottom.as_str(), Color::DarkGrey));
    draw_lines(out, view, &framed)
}

/// Lines centred horizontally and vertically in the play area.
fn draw_lines<W: Write>(out: &mut W, view: Viewport, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Arrows/WASD: Move  Mouse: Aim  Click: Fire  P: Pause  R: Restart  Q: Quit",
    ))?;
    Ok(())
}
