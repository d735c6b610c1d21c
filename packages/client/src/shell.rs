use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use shared::models::music::QueryFilters;
use shared::models::navigation::{Screen, Transition};
use shared::screens::Dashboard;
use shared::services::session_service::{ExpiryWatch, SessionEvent};

use crate::app::App;
use crate::render;

const HELP: &str = "\
Commands:
  login <email> <password>
  register <email> <user_name> <password>
  query title=.. year=.. artist=.. album=..
  subscribe <result number>
  subs
  remove <subscription number>
  logout
  help
  quit";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Login { email: String, password: String },
    Register { email: String, user_name: String, password: String },
    Query(QueryFilters),
    Subscribe(usize),
    Subscriptions,
    Remove(usize),
    Logout,
    Help,
    Quit,
}

fn number(arg: Option<&str>, what: &str) -> Result<usize, String> {
    match arg.map(str::parse::<usize>) {
        Some(Ok(n)) if n > 0 => Ok(n),
        _ => Err(format!("Usage: {} <number>", what)),
    }
}

fn filter_field<'a>(filters: &'a mut QueryFilters, key: &str) -> Option<&'a mut String> {
    match key {
        "title" => Some(&mut filters.title),
        "year" => Some(&mut filters.year),
        "artist" => Some(&mut filters.artist),
        "album" => Some(&mut filters.album),
        _ => None,
    }
}

/// `key=value` pairs. Words without `=` continue the previous value, so `title=Love Story` works.
fn parse_filters<'a>(words: impl Iterator<Item = &'a str>) -> Result<QueryFilters, String> {
    let mut filters = QueryFilters::default();
    let mut current: Option<&str> = None;
    for word in words {
        if let Some((key, value)) = word.split_once('=') {
            let field = filter_field(&mut filters, key)
                .ok_or_else(|| format!("Unknown filter '{}'", key))?;
            *field = value.to_string();
            current = Some(key);
        } else {
            let field = match current {
                Some(key) => filter_field(&mut filters, key),
                None => None,
            }
            .ok_or_else(|| format!("Expected key=value, got '{}'", word))?;
            field.push(' ');
            field.push_str(word);
        }
    }
    Ok(filters)
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    match command {
        "login" => match (words.next(), words.next()) {
            (Some(email), Some(password)) => Ok(ShellCommand::Login {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err("Usage: login <email> <password>".to_string()),
        },
        "register" => match (words.next(), words.next(), words.next()) {
            (Some(email), Some(user_name), Some(password)) => Ok(ShellCommand::Register {
                email: email.to_string(),
                user_name: user_name.to_string(),
                password: password.to_string(),
            }),
            _ => Err("Usage: register <email> <user_name> <password>".to_string()),
        },
        "query" => parse_filters(words).map(ShellCommand::Query),
        "subscribe" => number(words.next(), "subscribe").map(ShellCommand::Subscribe),
        "subs" | "subscriptions" => Ok(ShellCommand::Subscriptions),
        "remove" => number(words.next(), "remove").map(ShellCommand::Remove),
        "logout" => Ok(ShellCommand::Logout),
        "help" | "" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

struct Shell<'a> {
    app: &'a App,
    screen: Screen,
    dashboard: Dashboard,
    watch: Option<ExpiryWatch>,
}

impl<'a> Shell<'a> {
    fn new(app: &'a App) -> Self {
        Shell {
            app,
            screen: Screen::Login,
            dashboard: app.dashboard(),
            watch: None,
        }
    }

    fn stop_watch(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.handle.abort();
        }
    }

    async fn enter_dashboard(&mut self) {
        self.dashboard = self.app.dashboard();
        self.screen = Screen::Dashboard;
        let transition = self.dashboard.enter().await;
        self.follow(transition);
        if self.screen == Screen::Dashboard && self.watch.is_none() {
            self.watch = Some(
                self.app
                    .sessions
                    .clone()
                    .watch_expiry(self.app.config.expiry_check_interval),
            );
        }
    }

    fn follow(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Redirect(screen) => {
                if let Some(message) = self.dashboard.error.take() {
                    render::error(&message);
                }
                debug!("Redirecting to {:?}", screen);
                self.screen = screen;
            }
        }
        match self.screen {
            Screen::Dashboard => {
                if let Some(user_name) = &self.dashboard.user_name {
                    render::greeting(user_name);
                }
                render::subscriptions(&self.dashboard.subscriptions.subscriptions);
                if let Some(message) = &self.dashboard.subscriptions.error {
                    render::error(message);
                }
            }
            Screen::Login | Screen::Register => self.stop_watch(),
        }
    }

    fn requires_dashboard(&self) -> bool {
        if self.screen != Screen::Dashboard {
            render::error("Please log in first.");
            return false;
        }
        true
    }

    async fn handle(&mut self, command: ShellCommand) -> bool {
        match command {
            ShellCommand::Login { email, password } => {
                let mut screen = self.app.login_screen();
                screen.email = email;
                screen.password = password;
                match screen.submit().await {
                    Some(outcome) => {
                        render::notice("Login successful");
                        tokio::time::sleep(outcome.redirect_delay).await;
                        self.enter_dashboard().await;
                    }
                    None => render::error(screen.error.as_deref().unwrap_or("Login failed.")),
                }
            }
            ShellCommand::Register {
                email,
                user_name,
                password,
            } => {
                let mut screen = self.app.register_screen();
                screen.email = email;
                screen.user_name = user_name;
                screen.password = password;
                match screen.submit().await {
                    Some(outcome) => {
                        render::notice(&outcome.message);
                        self.screen = outcome.next;
                    }
                    None => render::error(screen.error.as_deref().unwrap_or("Registration failed.")),
                }
            }
            ShellCommand::Query(filters) if self.requires_dashboard() => {
                self.dashboard.query.filters = filters;
                let transition = self.dashboard.query.submit().await;
                if let Some(message) = &self.dashboard.query.error {
                    render::error(message);
                }
                render::results(&self.dashboard.query.results);
                if transition != Transition::Stay {
                    self.follow(transition);
                }
            }
            ShellCommand::Subscribe(n) if self.requires_dashboard() => {
                let transition = self.dashboard.subscribe(n - 1).await;
                if let Some(message) = &self.dashboard.query.notice {
                    render::notice(message);
                }
                if let Some(message) = &self.dashboard.query.error {
                    render::error(message);
                }
                self.follow(transition);
            }
            ShellCommand::Subscriptions if self.requires_dashboard() => {
                let transition = self.dashboard.subscriptions.refresh().await;
                self.follow(transition);
            }
            ShellCommand::Remove(n) if self.requires_dashboard() => {
                let uuid = self
                    .dashboard
                    .subscriptions
                    .subscriptions
                    .get(n - 1)
                    .map(|sub| sub.uuid.clone());
                match uuid {
                    Some(uuid) => {
                        let transition = self.dashboard.subscriptions.remove(&uuid).await;
                        self.follow(transition);
                    }
                    None => render::error(&format!("There is no subscription number {}.", n)),
                }
            }
            ShellCommand::Logout => {
                self.screen = self.dashboard.logout().await;
                self.stop_watch();
                render::notice("Logged out");
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => return false,
            _ => {}
        }
        true
    }

    fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Expired { redirect } => {
                info!("Session expired while the shell was open");
                render::error("Your session has expired. Please log in again.");
                self.screen = redirect;
                self.stop_watch();
            }
        }
    }
}

/// Interactive dashboard over stdin. Resumes a stored session when one is still valid.
pub async fn run(app: &App) -> Result<()> {
    let mut shell = Shell::new(app);
    println!("{}", HELP);
    shell.enter_dashboard().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = async {
            match shell.watch.as_mut() {
                Some(watch) => watch.events.recv().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            Some(event) = event => shell.on_session_event(event),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(command) => {
                        if !shell.handle(command).await {
                            break;
                        }
                    }
                    Err(message) => render::error(&message),
                }
            }
        }
    }

    shell.stop_watch();
    Ok(())
}
