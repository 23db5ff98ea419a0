use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::time::Instant;

use crate::config::LoginConfig;
use crate::nav::{ActionTarget, Params, ROUTES, ScreenDescriptor};
use crate::shell::{NoticeLevel, PendingAuth, Shell};
use crate::tui::theme::Theme;

const DRAWER_WIDTH: u16 = 34;

/// Terminal front-end over a [`Shell`]: maps keys to shell events and draws the
/// current screen descriptor, the drawer and pending notices.
pub struct ShellApp {
    shell: Shell,
    theme: Theme,
    login: LoginConfig,
    action_index: usize,
    menu_index: usize,
    /// Revision the action selection belongs to
    seen_revision: u64,
}

impl ShellApp {
    pub fn new(shell: Shell, theme: Theme, login: LoginConfig) -> Self {
        let seen_revision = shell.revision();
        Self {
            shell,
            theme,
            login,
            action_index: 0,
            menu_index: 0,
            seen_revision,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Handle a key press. Returns `false` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // An open notice swallows the key that dismisses it
        if self.shell.take_notice().is_some() {
            return Ok(true);
        }

        let drawer_shown = self.shell.drawer().is_opening_or_open();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                if !self.shell.handle_back() {
                    debug!("Back not consumed, exiting");
                    return Ok(false);
                }
            }
            KeyCode::Char('m') if key.modifiers == KeyModifiers::NONE => {
                self.menu_index = 0;
                self.shell.toggle_drawer();
            }
            KeyCode::Up => {
                if drawer_shown {
                    self.menu_index = self.menu_index.saturating_sub(1);
                } else {
                    self.action_index = self.action_index.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if drawer_shown {
                    let len = self.shell.menu().0.len();
                    self.menu_index = (self.menu_index + 1).min(len.saturating_sub(1));
                } else {
                    let len = self.shell.current_screen().descriptor.actions.len();
                    self.action_index = (self.action_index + 1).min(len.saturating_sub(1));
                }
            }
            KeyCode::Enter => {
                if drawer_shown {
                    self.activate_menu_item();
                } else {
                    self.activate_action(self.action_index);
                }
            }
            KeyCode::Char(c @ '1'..='9') if !drawer_shown => {
                let index = c as usize - '1' as usize;
                self.activate_action(index);
            }
            _ => {}
        }
        Ok(true)
    }

    /// Advance animations and apply queued events
    pub fn tick(&mut self, now: Instant) {
        self.shell.tick(now);
        self.shell.pump();
        if self.shell.revision() != self.seen_revision {
            self.seen_revision = self.shell.revision();
            self.action_index = 0;
        }
    }

    fn activate_menu_item(&mut self) {
        let (items, _) = self.shell.menu();
        if let Some(item) = items.get(self.menu_index) {
            self.shell.handle().select_menu(item.target_route);
            self.shell.pump();
        }
    }

    fn activate_action(&mut self, index: usize) {
        let screen = self.shell.current_screen();
        let Some(action) = screen.descriptor.actions.get(index).copied() else {
            return;
        };
        self.action_index = index;

        let params = match ROUTES.translate(screen.descriptor.route, action) {
            Ok(ActionTarget::SignIn) => Params::new()
                .with("email", self.login.email.as_str())
                .with("password", self.login.password.as_str()),
            _ => Params::new(),
        };
        screen.on_navigate.call(action, Some(params));
        self.shell.pump();
    }

    pub fn render(&self, frame: &mut Frame) {
        let now = Instant::now();
        let area = frame.area();
        let screen = self.shell.current_screen();
        let (_, palette) = self.shell.menu();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.base)),
            area,
        );
        self.render_header(frame, chunks[0], &screen.descriptor, palette.primary);
        self.render_body(frame, chunks[1], &screen.descriptor, palette.primary);
        self.render_footer(frame, chunks[2]);

        if !self.shell.drawer().is_closed() {
            self.render_drawer(frame, area, now);
        }
        if let Some(notice) = self.shell.notices().next() {
            let color = match notice.level {
                NoticeLevel::Info => self.theme.teal,
                NoticeLevel::Warning => self.theme.yellow,
                NoticeLevel::Error => self.theme.red,
            };
            let popup = centered(area, 50, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(notice.message.clone(), Style::default().fg(self.theme.text))),
                    Line::from(""),
                    Line::from(Span::styled("Press any key", self.theme.muted_style())),
                ])
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title(Span::styled(notice.title.clone(), Style::default().fg(color).bold()))
                        .style(Style::default().bg(self.theme.surface0)),
                ),
                popup,
            );
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, descriptor: &ScreenDescriptor, accent: ratatui::style::Color) {
        let mut spans = vec![Span::styled(descriptor.title, self.theme.title_style())];

        let state = self.shell.state();
        if let Some(user) = state.current_user() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} ({})", user.full_name(), user.role.label()),
                Style::default().fg(accent),
            ));
            if state.manual_auth() {
                spans.push(Span::styled(" [demo]", self.theme.muted_style()));
            }
        } else {
            spans.push(Span::styled("  signed out", self.theme.muted_style()));
        }

        match self.shell.pending() {
            Some(PendingAuth::SignIn { email }) => spans.push(Span::styled(
                format!("  signing in as {}...", email),
                Style::default().fg(self.theme.yellow),
            )),
            Some(PendingAuth::SignOut) => {
                spans.push(Span::styled("  signing out...", Style::default().fg(self.theme.yellow)))
            }
            None => {}
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.surface1)),
            ),
            area,
        );
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, descriptor: &ScreenDescriptor, accent: ratatui::style::Color) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let label = |name: &str| Span::styled(format!("{:<10}", name), self.theme.muted_style());
        let value = |text: String| Span::styled(text, Style::default().fg(self.theme.text));

        let mut lines = vec![
            Line::from(vec![label("route"), value(descriptor.requested.clone())]),
            Line::from(vec![label("component"), value(descriptor.component.to_string())]),
            Line::from(vec![label("kind"), value(format!("{:?}", descriptor.kind))]),
        ];
        if let Some(previous) = self.shell.state().previous_route() {
            lines.push(Line::from(vec![label("previous"), value(previous.to_string())]));
        }
        if let Some(binding) = &descriptor.identity {
            let style = if binding.is_fallback() {
                Style::default().fg(self.theme.peach)
            } else {
                Style::default().fg(self.theme.green)
            };
            lines.push(Line::from(vec![
                label("identity"),
                Span::styled(format!("{} = {} ({:?})", binding.key, binding.value, binding.source), style),
            ]));
        }
        if !descriptor.params.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Params", self.theme.title_style())));
            for (key, val) in descriptor.params.iter() {
                lines.push(Line::from(vec![label(key), value(val.to_string())]));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Screen ")
                    .border_style(Style::default().fg(self.theme.surface1)),
            ),
            chunks[0],
        );

        let items: Vec<ListItem> = descriptor
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), self.theme.muted_style()),
                    Span::styled(*action, Style::default().fg(self.theme.text)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(self.action_index));
        frame.render_stateful_widget(
            List::new(items)
                .highlight_style(self.theme.selected_style(accent))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Actions ")
                        .border_style(Style::default().fg(self.theme.surface1)),
                ),
            chunks[1],
            &mut list_state,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = "[Esc] back  [m] menu  [↑/↓] select  [Enter/1-9] activate  [Ctrl+Q] quit";
        frame.render_widget(Paragraph::new(Span::styled(hint, self.theme.muted_style())), area);
    }

    fn render_drawer(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let drawer = self.shell.drawer();
        let dim = drawer.overlay_opacity(now);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.dim(self.theme.base, dim))),
            area,
        );

        let width = (DRAWER_WIDTH as f32 * drawer.progress(now)).round() as u16;
        if width < 2 {
            return;
        }
        let panel = Rect {
            width: width.min(area.width),
            ..area
        };

        let (items, palette) = self.shell.menu();
        let list: Vec<ListItem> = items
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", item.icon), Style::default().fg(palette.secondary)),
                    Span::styled(item.title, Style::default().fg(self.theme.text)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(self.menu_index));

        frame.render_widget(Clear, panel);
        frame.render_stateful_widget(
            List::new(list)
                .highlight_style(self.theme.selected_style(palette.accent))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Span::styled(" Menu ", Style::default().fg(palette.primary).bold()))
                        .border_style(Style::default().fg(palette.primary))
                        .style(Style::default().bg(self.theme.surface0)),
                ),
            panel,
            &mut list_state,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RouteId;
    use crate::session::{Account, LocalSessionProvider, Role};
    use crate::shell::ShellOptions;
    use std::sync::Arc;
    use std::time::Duration;

    fn app() -> ShellApp {
        let provider = Arc::new(LocalSessionProvider::new(
            vec![Account::new("student@campus.local", "student123", "Demo Student", Role::Student)],
            Duration::ZERO,
        ));
        let shell = Shell::new(ShellOptions::default(), provider);
        ShellApp::new(shell, Theme::default(), LoginConfig::default())
    }

    fn press(app: &mut ShellApp, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_number_key_activates_action() {
        let mut app = app();
        // Welcome offers login first
        assert!(press(&mut app, KeyCode::Char('1')));
        assert_eq!(app.shell().state().current_route(), RouteId::Login);
    }

    #[test]
    fn test_unconsumed_back_exits() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_back_then_exit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert!(press(&mut app, KeyCode::Esc));
        assert_eq!(app.shell().state().current_route(), RouteId::Welcome);
        assert!(!press(&mut app, KeyCode::Backspace));
    }

    #[test]
    fn test_notice_swallows_dismissing_key() {
        let mut app = app();
        app.shell.current_screen().on_navigate.call("grade-assignments", None);
        app.shell.pump();
        assert!(app.shell().notices().next().is_some());

        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.shell().notices().next().is_none());
        assert_eq!(app.shell().state().current_route(), RouteId::Welcome);
    }

    #[test]
    fn test_drawer_menu_selection() {
        let mut app = app();
        app.shell.bypass_sign_in(crate::session::User::bypass(Role::Teacher));
        press(&mut app, KeyCode::Char('m'));
        assert!(app.shell().state().drawer_open());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let (items, _) = app.shell().menu();
        assert_eq!(app.shell().state().current_route(), items[1].target_route);
    }
}
