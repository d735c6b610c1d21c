use colored::*;
use shared::models::music::{Subscription, Track};

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

pub fn notice(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn greeting(user_name: &str) {
    println!("\n{}", format!("Welcome, {}", user_name).bold());
}

fn describe(track: &Track) -> String {
    let mut line = format!(
        "{} - {} ({}) [{}]",
        track.title, track.artist, track.year, track.album
    );
    if let Some(img_url) = &track.img_url {
        line.push_str(&format!("\n      {}", img_url.dimmed()));
    }
    line
}

/// Numbered from 1, the numbering `subscribe` takes.
pub fn results(tracks: &[Track]) {
    if tracks.is_empty() {
        return;
    }
    println!("\n{}", "Query results".bold());
    for (i, track) in tracks.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, describe(track));
    }
}

pub fn subscriptions(subscriptions: &[Subscription]) {
    println!("\n{}", "Subscriptions".bold());
    if subscriptions.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for (i, sub) in subscriptions.iter().enumerate() {
        println!(
            "  {:>2}. {}  {}",
            i + 1,
            describe(&sub.track),
            sub.uuid.dimmed()
        );
    }
}
