use chrono::NaiveDate;
use clap::{Args, Subcommand};
use crossterm::style::Stylize;

use nu_core::category::chip_label;
use nu_core::dates::{api_date, format_long, parse_api_date, parse_article_date, today};
use nu_core::{DailyResource, DisplayMode, Error, Result};
use nu_format::build_resource_view;

use crate::feed::FeedState;
use crate::manager::{DetailParams, FeedManager};

#[derive(Args, Debug, Clone)]
pub struct ReaderArgs {
    #[command(subcommand)]
    pub command: ReaderCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReaderCommands {
    /// List the articles of one day
    Feed {
        /// A source name, or "Exam" for exam-specific articles across all sources
        #[arg(long)]
        mode: Option<String>,
        /// Day to list, DD-MM-YYYY (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
        /// Pages to reveal
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Show one article
    Article {
        /// Paper the article was published in
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        id: Option<String>,
        /// Detail lens, "Exam" for the exam analysis (defaults to the source)
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// List the exam revision resources of one day
    Resources {
        /// Day to list, DD-MM-YYYY (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Show the resource at this position in the list
        #[arg(long)]
        index: Option<usize>,
    },
    /// List configured sources
    Sources,
}

pub async fn handle_command(args: ReaderArgs, manager: &FeedManager) -> Result<()> {
    match args.command {
        ReaderCommands::Feed {
            mode,
            date,
            category,
            pages,
        } => {
            let mode = mode
                .map(|m| m.parse::<DisplayMode>().unwrap_or_else(|never| match never {}))
                .unwrap_or_else(|| DisplayMode::Source(manager.config().default_source().to_string()));
            let date = parse_date_arg(date.as_deref())?;

            let mut state = FeedState::new(mode, date, manager.config());
            manager.refresh(&mut state).await?;
            if let Some(category) = category {
                state.select_category(&category);
            }
            for _ in 1..pages.max(1) {
                if !state.load_more().await {
                    break;
                }
            }
            print!("{}", format_feed(&state));
        }
        ReaderCommands::Article {
            source,
            id,
            mode,
            date,
        } => {
            let display_mode = match (mode, &source) {
                (Some(mode), _) => mode.parse().unwrap_or_else(|never| match never {}),
                (None, Some(source)) => DisplayMode::Source(source.clone()),
                (None, None) => DisplayMode::Source(String::new()),
            };
            let params = DetailParams {
                id,
                source,
                date,
                display_mode,
            };
            let view = manager.load_article(&params).await?;
            print!("{}", view.render_with(&|s: &str| s.bold().yellow().to_string()));
        }
        ReaderCommands::Resources { date, index } => {
            let date = parse_date_arg(date.as_deref())?;
            let resources = manager.load_resources(date).await?;
            match index {
                Some(index) => {
                    let resource = select_resource(&resources, index, date)?;
                    print!("{}", build_resource_view(resource).to_plain_text());
                }
                None => print!("{}", format_resources(date, &resources)),
            }
        }
        ReaderCommands::Sources => {
            println!("Available sources:");
            for source in manager.sources() {
                println!("  {}", source);
            }
            println!("  {} (exam-specific articles from all of the above)", nu_core::EXAM_MODE);
        }
    }
    Ok(())
}

/// Accepts the API form `DD-MM-YYYY` and the ISO forms the backend returns.
pub fn parse_date_arg(raw: Option<&str>) -> Result<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(today()),
        Some(s) => parse_api_date(s).or_else(|e| parse_article_date(s).ok_or(e)),
    }
}

/// Picks the `--index` entry; an index past the end is a usage error, not a 404.
pub fn select_resource(resources: &[DailyResource], index: usize, date: NaiveDate) -> Result<&DailyResource> {
    resources.get(index).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "no resource #{} for {} ({} available)",
            index,
            api_date(date),
            resources.len()
        ))
    })
}

pub fn format_feed(state: &FeedState) -> String {
    let mut out = format!("{} · {}\n", state.mode().header_title(), format_long(state.date()));

    let chips: Vec<String> = state
        .chips()
        .iter()
        .map(|chip| format!("{} ({})", chip_label(&chip.display), chip.count))
        .collect();
    out.push_str(&chips.join("  "));
    out.push('\n');

    let filtered = state.filtered().len();
    if filtered == 0 {
        out.push_str("No articles found for this day.\n");
        return out;
    }

    out.push('\n');
    for (i, article) in state.visible().iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, article.title));
        out.push_str(&format!(
            "     {} · {} · id {}\n",
            chip_label(&article.category),
            article.source,
            article.id
        ));
        if let Some(headings) = article.syllabus_headings.as_ref().filter(|h| !h.is_empty()) {
            out.push_str(&format!("     {}\n", headings.join(", ")));
        }
    }
    if !state.all_loaded() {
        out.push_str(&format!("\nShowing {} of {}\n", state.visible().len(), filtered));
    }
    out
}

pub fn format_resources(date: NaiveDate, resources: &[DailyResource]) -> String {
    let mut out = format!("Resources · {}\n", format_long(date));
    if resources.is_empty() {
        out.push_str("No resources found for this day.\n");
        return out;
    }
    for (i, resource) in resources.iter().enumerate() {
        let topic = resource
            .topic
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled");
        match resource.category.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(category) => out.push_str(&format!("{:>3}. {} [{}]\n", i, topic, category)),
            None => out.push_str(&format!("{:>3}. {}\n", i, topic)),
        }
    }
    out
}
