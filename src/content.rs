//! Static portfolio content: banner, about, skills, socials.

use crate::config::Config;
use crate::output::{Block, Class, Line, Span};

const BANNER_ART: &str = r#"
 ____                    _
|  _ \  ___  _   _  __ _| | __ _ ___
| | | |/ _ \| | | |/ _` | |/ _` / __|
| |_| | (_) | |_| | (_| | | (_| \__ \
|____/ \___/ \__,_|\__, |_|\__,_|___/
                   |___/
"#;

pub const PROMPT_USER: &str = "guest@portfolio";
pub const PROMPT_DIR: &str = "~";

pub fn banner() -> Block {
    let mut block = Block::new();
    for line in BANNER_ART.lines().skip(1) {
        block.push(Line::styled(line, Class::PromptUser));
    }
    block.push(Line::plain("Welcome to my interactive portfolio."));
    block.push(vec![
        Span::plain("Type "),
        Span::accent("'help'"),
        Span::plain(" to see the available commands."),
    ]);
    block
}

pub fn about() -> Block {
    Block::new()
        .with(vec![
            Span::plain("Hey there o/, welcome! My name is "),
            Span::strong("Douglas"),
            Span::plain(" and it's a pleasure to have you here ;)"),
        ])
        .with(Line::blank())
        .with(Line::plain(
            "I'm a developer who loves technology, always hustling to learn more and to build useful, creative things.",
        ))
        .with(Line::blank())
        .with(vec![
            Span::plain("I work with "),
            Span::strong("Java, Spring Boot, Node.js, Python, Go"),
            Span::plain(" and databases like "),
            Span::strong("Oracle, PostgreSQL and MySQL"),
            Span::plain(". I also enjoy playing with "),
            Span::strong("Docker, REST APIs, JWT"),
            Span::plain(" and system modeling."),
        ])
        .with(Line::blank())
        .with(vec![
            Span::plain("I've done a bit of everything: from "),
            Span::new("robust modules", Class::Italic),
            Span::plain(" to complete APIs, exploring the connection between front and back end."),
        ])
        .with(Line::blank())
        .with(Line::plain(
            "Right now I'm focused on growing every day and letting my projects speak for me ;)",
        ))
        .with(Line::blank())
        .with(Line::plain(
            "Away from code I like learning new things, taking on challenges and putting a personal touch on what I do.",
        ))
}

pub fn skills() -> Block {
    let groups: [(&str, &[&str]); 4] = [
        ("Languages", &["Java", "JavaScript", "Python", "Go"]),
        ("Frontend", &["React (basic)", "Vue (basic)", "Angular (basic)"]),
        ("Backend", &["Node.js", "FastAPI", "Spring Boot", "Gin/Echo"]),
        ("DevOps", &["Docker", "Git"]),
    ];

    let mut block = Block::new().with(Line::styled("Technical skills:", Class::Heading));
    for (title, items) in groups {
        block.push(Line::blank());
        block.push(Line::styled(format!("{title}:"), Class::PromptDir));
        for item in items {
            block.push(Line::plain(format!("  - {item}")));
        }
    }
    block
}

pub fn socials(config: &Config) -> Block {
    let github = format!("github.com/{}", config.effective_github_user());
    Block::new()
        .with(Line::styled("Social networks:", Class::Heading))
        .with(Line::blank())
        .with(vec![Span::plain("GitHub:   "), Span::link(github)])
        .with(vec![
            Span::plain("LinkedIn: "),
            Span::link("linkedin.com/in/dougcunha"),
        ])
}

pub fn contact(config: &Config) -> Block {
    Block::new()
        .with(Line::styled("Contact:", Class::Heading))
        .with(Line::blank())
        .with(vec![
            Span::plain("Email: "),
            Span::accent(config.effective_contact_email()),
        ])
        .with(vec![
            Span::plain("Tip: "),
            Span::accent("email"),
            Span::plain(" copies the address to your clipboard."),
        ])
}

pub fn projects(config: &Config) -> Block {
    Block::new()
        .with(Line::styled("Projects:", Class::Heading))
        .with(Line::blank())
        .with(Line::plain(
            "Most of my work lives on GitHub. Run 'github' for the latest repositories, or visit:",
        ))
        .with(Line::styled(
            format!("https://github.com/{}", config.effective_github_user()),
            Class::Link,
        ))
}

pub fn cowsay(message: &str) -> Block {
    let width = message.chars().count();
    let mut block = Block::new();
    block.push(Line::plain(format!(" {}", "_".repeat(width + 2))));
    block.push(Line::plain(format!("< {message} >")));
    block.push(Line::plain(format!(" {}", "-".repeat(width + 2))));
    for line in [
        r"        \   ^__^",
        r"         \  (oo)\_______",
        r"            (__)\       )\/\",
        r"                ||----w |",
        r"                ||     ||",
    ] {
        block.push(Line::plain(line));
    }
    block
}
