use std::{collections::HashMap, fmt::Debug, path::PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{de::Deserializer, Deserialize};

use crate::{
    action::{Action, ActionState, Command, GameAction},
    pages::PageId,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub styles: Styles,
}

impl Config {
    /// Loads the embedded defaults, then overlays an optional user
    /// `config.yaml` from the config directory. User entries win; anything
    /// they leave out falls back to the defaults.
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config = serde_yaml::from_str(CONFIG).unwrap();
        let data_dir = crate::utils::get_data_dir();
        let config_dir = crate::utils::get_config_dir();
        let builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_str().unwrap())?
            .set_default("_config_dir", config_dir.to_str().unwrap())?
            .add_source(
                config::File::from(config_dir.join("config.yaml"))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );
        if !config_dir.join("config.yaml").exists() {
            log::info!("No user configuration file found, using defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        for (page, default_bindings) in default_config.keybindings.pages.iter() {
            let user_bindings = cfg.keybindings.pages.entry(page.clone()).or_default();
            for (key, action) in default_bindings.0.iter() {
                user_bindings.0.entry(*key).or_insert_with(|| action.clone());
            }
        }
        for (key, action) in default_config.keybindings.global.0.iter() {
            cfg.keybindings.global.0.entry(*key).or_insert_with(|| action.clone());
        }
        for (name, style) in default_config.styles.0.iter() {
            cfg.styles.0.entry(name.clone()).or_insert(*style);
        }

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
    pub hold: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    pub global: RawPageKeyBindings,
    pub pages: HashMap<String, RawPageKeyBindings>,
}

#[derive(Clone, Debug, Default)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

macro_rules! parse_and_map_actions {
    ( $( ( $page_id_variant:path, $action_type:ty, $action_variant:path ) ),* ) => {
        fn match_page_keybindings(page: &str, raw: &RawPageKeyBindings) -> (PageId, PageKeyBindings) {
            let page_id: PageId = serde_yaml::from_str(page).unwrap();
            let map = match page_id {
                $(
                    $page_id_variant => parse_page_keybindings::<$action_type>(raw)
                        .into_iter()
                        .map(|(event, (command, state))| (event, Action { command: $action_variant(command), state }))
                        .collect(),
                )*
            };

            (page_id, PageKeyBindings(map))
        }
    };
}

parse_and_map_actions![(PageId::Game, GameAction, Command::Game)];

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: RawKeyBindings = RawKeyBindings::deserialize(deserializer)?;

        let global = PageKeyBindings(
            parse_page_keybindings::<Command>(&raw.global)
                .into_iter()
                .map(|(event, (command, state))| (event, Action { command, state }))
                .collect(),
        );
        let pages = raw.pages.iter().map(|(page, bindings)| match_page_keybindings(page, bindings)).collect();

        Ok(KeyBindings { global, pages })
    }
}

fn parse_raw_bindings<T>(map: &Option<HashMap<String, String>>) -> HashMap<KeyEvent, T>
where
    T: for<'de> Deserialize<'de>,
{
    map.as_ref()
        .map(|inner| {
            inner
                .iter()
                .map(|(key_str, action_str)| {
                    let action: T = serde_yaml::from_str(action_str).unwrap();
                    (parse_key_event(key_str).unwrap(), action)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_page_keybindings<T>(raw: &RawPageKeyBindings) -> HashMap<KeyEvent, (T, ActionState)>
where
    T: for<'de> Deserialize<'de> + Clone + Debug,
{
    merge_keybinding_maps(parse_raw_bindings(&raw.click), parse_raw_bindings(&raw.hold))
}

/// Click bindings fire once with the default state; hold bindings expand into
/// press/repeat/release entries so the page can tell the phases apart.
fn merge_keybinding_maps<A: Clone>(
    click: HashMap<KeyEvent, A>,
    hold: HashMap<KeyEvent, A>,
) -> HashMap<KeyEvent, (A, ActionState)> {
    let mut merged: HashMap<KeyEvent, (A, ActionState)> =
        click.into_iter().map(|(event, action)| (event, (action, ActionState::default()))).collect();
    for (mut event, action) in hold {
        merged.insert(event, (action.clone(), ActionState::Start));
        event.kind = KeyEventKind::Repeat;
        merged.insert(event, (action.clone(), ActionState::Repeat));
        event.kind = KeyEventKind::Release;
        merged.insert(event, (action, ActionState::End));
    }

    merged
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let raw = raw.trim_start_matches('<').trim_end_matches('>');
    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        if let Some(rest) = current.strip_prefix("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("shift-") {
            modifiers.insert(KeyModifiers::SHIFT);
            current = rest;
        } else {
            break;
        }
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let code = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        f_key if f_key.len() > 1 && f_key.starts_with('f') => {
            let n = f_key[1..].parse::<u8>().map_err(|_| format!("Unable to parse `{raw}`"))?;
            if !(1..=12).contains(&n) {
                return Err(format!("Unable to parse `{raw}`"));
            }
            KeyCode::F(n)
        },
        c if c.len() == 1 => {
            let mut c = c.chars().next().unwrap();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse `{raw}`")),
    };
    Ok(KeyEvent::new(code, modifiers))
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Styles(pub HashMap<String, Style>);

impl Styles {
    /// Looks up a named style, falling back to the terminal default so a
    /// missing entry degrades to uncolored output rather than an error.
    pub fn style(&self, name: &str) -> Style {
        self.0.get(name).copied().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, String>::deserialize(deserializer)?;
        let styles = parsed_map.into_iter().map(|(name, line)| (name, parse_style(&line))).collect();

        Ok(Styles(styles))
    }
}

pub fn parse_style(line: &str) -> Style {
    let (foreground, background) = line.split_at(line.to_lowercase().find("on ").unwrap_or(line.len()));
    let foreground = process_color_string(foreground);
    let background = process_color_string(&background.replace("on ", ""));

    let mut style = Style::default();
    if let Some(fg) = parse_color(&foreground.0) {
        style = style.fg(fg);
    }
    if let Some(bg) = parse_color(&background.0) {
        style = style.bg(bg);
    }
    style.add_modifier(foreground.1 | background.1)
}

fn process_color_string(color_str: &str) -> (String, Modifier) {
    let color = color_str
        .replace("grey", "gray")
        .replace("bright ", "")
        .replace("bold ", "")
        .replace("underline ", "")
        .replace("inverse ", "");

    let mut modifiers = Modifier::empty();
    if color_str.contains("underline") {
        modifiers |= Modifier::UNDERLINED;
    }
    if color_str.contains("bold") {
        modifiers |= Modifier::BOLD;
    }
    if color_str.contains("inverse") {
        modifiers |= Modifier::REVERSED;
    }

    (color, modifiers)
}

fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix("color") {
        return Some(Color::Indexed(rest.parse::<u8>().unwrap_or_default()));
    }
    if let Some(rest) = s.strip_prefix("gray") {
        return Some(Color::Indexed(232 + rest.parse::<u8>().unwrap_or_default()));
    }
    if let Some(rest) = s.strip_prefix("rgb") {
        let digits: Vec<u8> = rest.chars().take(3).filter_map(|c| c.to_digit(10)).map(|d| d as u8).collect();
        if digits.len() == 3 {
            return Some(Color::Indexed(16 + digits[0] * 36 + digits[1] * 6 + digits[2]));
        }
        return None;
    }

    let named = match s {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" => 5,
        "cyan" => 6,
        "white" => 7,
        _ => return None,
    };
    Some(Color::Indexed(named))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::act;

    #[test]
    fn test_parse_style_default() {
        let style = parse_style("");
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_parse_style_foreground() {
        let style = parse_style("red");
        assert_eq!(style.fg, Some(Color::Indexed(1)));
    }

    #[test]
    fn test_parse_style_background() {
        let style = parse_style("on blue");
        assert_eq!(style.bg, Some(Color::Indexed(4)));
        assert_eq!(style.fg, None);
    }

    #[test]
    fn test_parse_style_modifiers() {
        let style = parse_style("underline red on blue");
        assert_eq!(style.fg, Some(Color::Indexed(1)));
        assert_eq!(style.bg, Some(Color::Indexed(4)));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_process_color_string() {
        let (color, modifiers) = process_color_string("underline bold inverse gray");
        assert_eq!(color, "gray");
        assert!(modifiers.contains(Modifier::UNDERLINED));
        assert!(modifiers.contains(Modifier::BOLD));
        assert!(modifiers.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_parse_color_rgb() {
        let color = parse_color("rgb123");
        let expected = 16 + 36 + 2 * 6 + 3;
        assert_eq!(color, Some(Color::Indexed(expected)));
    }

    #[test]
    fn test_parse_color_unknown() {
        assert_eq!(parse_color("unknown"), None);
    }

    #[test]
    fn test_default_config_has_game_bindings() {
        let config: Config = serde_yaml::from_str(CONFIG).unwrap();

        let game_bindings = config.keybindings.pages.get(&PageId::Game).unwrap();
        let flap = game_bindings.0.get(&parse_key_event("<space>").unwrap()).unwrap();
        assert_eq!(flap, &act!(Command::Game(GameAction::Flap)));

        let quit = config.keybindings.global.0.get(&parse_key_event("<q>").unwrap()).unwrap();
        assert_eq!(quit, &act!(Command::Quit));
    }

    #[test]
    fn test_default_config_has_styles() {
        let config: Config = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(config.styles.style("bird").bg, Some(Color::Indexed(3)));
        assert_eq!(config.styles.style("background").bg, Some(Color::Indexed(4)));
        // Unknown names fall back to the default style.
        assert_eq!(config.styles.style("nonexistent"), Style::default());
    }

    #[test]
    fn test_hold_bindings_expand_to_phases() {
        let raw = RawPageKeyBindings {
            click: None,
            hold: Some(HashMap::from([("<space>".to_string(), "Flap".to_string())])),
        };
        let bindings = parse_page_keybindings::<GameAction>(&raw);

        let press = parse_key_event("<space>").unwrap();
        assert_eq!(bindings.get(&press), Some(&(GameAction::Flap, ActionState::Start)));

        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert_eq!(bindings.get(&release), Some(&(GameAction::Flap, ActionState::End)));
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));
        assert_eq!(parse_key_event("enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
        assert_eq!(parse_key_event("esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
        assert_eq!(parse_key_event("f5").unwrap(), KeyEvent::new(KeyCode::F(5), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );
        assert_eq!(
            parse_key_event("ctrl-shift-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("f99").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
