use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::{Gathering, Link};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_links(links: &[Link]) {
    println!("{:<34} {:<24} {}", "ID", "NAME", "URL");
    println!("{}", "-".repeat(90));
    for link in links {
        println!("{:<34} {:<24} {}", link.id, truncate(&link.name, 24), link.redirect_url);
    }
}

pub fn print_link(link: &Link) {
    println!("ID:          {}", link.id);
    println!("Name:        {}", link.name);
    println!("URL:         {}", link.redirect_url);
    if !link.description.is_empty() {
        println!("Description: {}", link.description);
    }
    if !link.icon_url.is_empty() {
        println!("Icon:        {}", truncate(&link.icon_url, 60));
    }
}

pub fn print_gatherings(gatherings: &[Gathering]) {
    println!(
        "{:<34} {:<10} {:<5} {:<6} {:>9}  {}",
        "ID", "DATE", "TIME", "STATUS", "ATTENDING", "TITLE"
    );
    println!("{}", "-".repeat(100));
    for g in gatherings {
        println!(
            "{:<34} {:<10} {:<5} {:<6} {:>9}  {}",
            g.id,
            g.date,
            g.time.format("%H:%M"),
            g.status,
            g.attendees,
            g.title
        );
    }
}

pub fn print_gathering(g: &Gathering) {
    println!("ID:          {}", g.id);
    println!("Title:       {}", g.title);
    println!("When:        {} {}", g.date, g.time.format("%H:%M"));
    if let Some(deadline) = g.deadline_date {
        println!("Deadline:    {}", deadline);
    }
    println!("Status:      {}", g.status);
    println!("Attending:   {}", g.attendees);
    if !g.description.is_empty() {
        println!("Description: {}", g.description);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
