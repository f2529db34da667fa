mod bird;
mod hitbox;
mod pipe;

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::overlay::Overlay,
    config::Config,
    constants::game,
    pages::game::{bird::Bird, hitbox::Hitbox, pipe::Pipe},
};

enum State {
    Playing,
    GameOver { hold: u16 },
}

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    config: Config,
    state: State,
    bird: Bird,
    pipe: Pipe,
    score: u32,
}

impl GamePage {
    pub fn new() -> Self {
        GamePage {
            action_tx: None,
            config: Config::default(),
            state: State::Playing,
            bird: Bird::new(),
            pipe: Pipe::new(game::FIRST_PIPE_X),
            score: 0,
        }
    }

    fn tick(&mut self) -> Result<()> {
        match self.state {
            State::Playing => {
                self.bird.step();
                self.pipe.step();

                // A pipe that has fully scrolled off the left edge counts as
                // passed: replace it and score.
                if self.pipe.is_off_screen() {
                    self.pipe = Pipe::new(game::RESPAWN_PIPE_X);
                    self.score += 1;
                    log::info!("Pipe passed, score: {}", self.score);
                }

                if self.hit_pipe() || self.out_of_bounds() {
                    log::info!("Game over at score {}", self.score);
                    self.state = State::GameOver { hold: game::GAME_OVER_HOLD_TICKS };
                }
            },
            State::GameOver { ref mut hold } => {
                if *hold > 0 {
                    *hold -= 1;
                    if *hold == 0 {
                        if let Some(action_tx) = &self.action_tx {
                            action_tx.send(act!(Command::Quit))?;
                        }
                    }
                }
            },
        }
        Ok(())
    }

    fn hit_pipe(&self) -> bool {
        let bird = self.bird.hitbox();
        let (top, bottom) = self.pipe.hitboxes();
        bird.overlaps(&top) || bird.overlaps(&bottom)
    }

    fn out_of_bounds(&self) -> bool {
        self.bird.y() > game::SCREEN_HEIGHT || self.bird.y() < 0.0
    }

    fn draw_hitbox(&self, f: &mut Frame<'_>, area: Rect, hb: &Hitbox, style_name: &str) {
        if let Some(rect) = project(area, hb) {
            f.render_widget(Block::default().style(self.config.styles.style(style_name)), rect);
        }
    }
}

/// Maps a logical-unit rectangle onto terminal cells within `area`, clipping
/// against the playfield edges. Returns `None` when nothing remains visible.
fn project(area: Rect, hb: &Hitbox) -> Option<Rect> {
    let sx = area.width as f32 / game::SCREEN_WIDTH;
    let sy = area.height as f32 / game::SCREEN_HEIGHT;

    let left = (hb.x * sx).round().clamp(0.0, area.width as f32) as u16;
    let right = (hb.right() * sx).round().clamp(0.0, area.width as f32) as u16;
    let top = (hb.y * sy).round().clamp(0.0, area.height as f32) as u16;
    let bottom = (hb.bottom() * sy).round().clamp(0.0, area.height as f32) as u16;
    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect { x: area.x + left, y: area.y + top, width: right - left, height: bottom - top })
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => self.tick()?,
            Command::Game(GameAction::Flap) if action.state == ActionState::Start => {
                if let State::Playing = self.state {
                    self.bird.flap();
                }
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let styles = &self.config.styles;

        f.render_widget(Block::default().style(styles.style("background")), area);

        self.draw_hitbox(f, area, &self.bird.hitbox(), "bird");
        let (top, bottom) = self.pipe.hitboxes();
        self.draw_hitbox(f, area, &top, "pipe");
        self.draw_hitbox(f, area, &bottom, "pipe");

        let score = Paragraph::new(self.score.to_string())
            .style(styles.style("score"))
            .alignment(Alignment::Center);
        f.render_widget(score, Rect { height: 1, ..area });

        if let State::GameOver { .. } = self.state {
            let overlay = Overlay::new(vec![game::GAME_OVER_TEXT]).style(styles.style("game_over"));
            f.render_widget(overlay, area);
        }

        Ok(())
    }
}
