use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    widgets::{Block, BorderType, Borders},
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::{act, Action, Command},
    config::Config,
    constants::{HEIGHT, WIDTH},
    pages::{game::GamePage, Page},
    tui,
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    page: GamePage,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let config = Config::new()?;
        let page = GamePage::new();

        Ok(Self { config, tick_rate, frame_rate, should_quit: false, should_suspend: false, page })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        self.page.register_action_handler(action_tx.clone())?;
        self.page.register_config_handler(self.config.clone())?;
        self.page.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
                    tui::Event::Render => action_tx.send(act!(Command::Render))?,
                    tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(x, y)))?,
                    tui::Event::Key(key) => {
                        // Global bindings win over page bindings.
                        let mut action = None;
                        if let Some(keymap) = self.config.keybindings.pages.get(&self.page.id()) {
                            action = keymap.0.get(&key);
                        }
                        if let Some(global) = self.config.keybindings.global.0.get(&key) {
                            action = Some(global);
                        }

                        if let Some(action) = action {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                if let Some(action) = self.page.handle_events(Some(e))? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                let Action { command, .. } = &action;
                if *command != Command::Tick && *command != Command::Render {
                    log::debug!("{command}");
                }
                match command {
                    Command::Tick => {},
                    Command::Quit => self.should_quit = true,
                    Command::Suspend => self.should_suspend = true,
                    Command::Resume => self.should_suspend = false,
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Error(msg) => {
                        log::error!("{msg}");
                    },
                    _ => {},
                }
                if let Some(action) = self.page.update(action)? {
                    action_tx.send(action)?
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui = tui::Tui::new()?;
                tui.tick_rate(self.tick_rate);
                tui.frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            // Center a fixed-size playfield; the +2 leaves room for the border.
            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT + 2), Constraint::Fill(1)])
                    .areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH + 2), Constraint::Fill(1)])
                    .areas(area);

            let border =
                Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title("Flappy Bird");
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Err(e) = self.page.draw(f, area) {
                action_tx.send(act!(Command::Error(format!("Failed to draw: {:?}", e)))).unwrap();
            }
        })?;

        Ok(())
    }
}
