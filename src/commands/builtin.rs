//! Built-in command actions.

use crate::content;
use crate::files;
use crate::output::{Block, Class, Line, Span};
use crate::remote::RemoteRequest;
use crate::theme;

use super::{CommandSpec, Invocation, Outcome};

const NAME_COLUMN: usize = 10;

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help",
        description: "List all commands.",
        action: help,
    },
    CommandSpec {
        name: "man",
        usage: "man <command>",
        description: "Show the manual entry for a command.",
        action: man,
    },
    CommandSpec {
        name: "about",
        usage: "about",
        description: "About me (opens a window).",
        action: about,
    },
    CommandSpec {
        name: "skills",
        usage: "skills",
        description: "My skills (opens a window).",
        action: skills,
    },
    CommandSpec {
        name: "socials",
        usage: "socials",
        description: "My social networks (opens a window).",
        action: socials,
    },
    CommandSpec {
        name: "github",
        usage: "github",
        description: "Fetch my 5 most recently updated repositories.",
        action: github,
    },
    CommandSpec {
        name: "email",
        usage: "email",
        description: "Copy my email address to the clipboard.",
        action: email,
    },
    CommandSpec {
        name: "history",
        usage: "history",
        description: "Show the command history.",
        action: history,
    },
    CommandSpec {
        name: "motd",
        usage: "motd",
        description: "Show a quote of the day.",
        action: motd,
    },
    CommandSpec {
        name: "crypto",
        usage: "crypto <id>",
        description: "Look up a crypto asset price in USD and BRL.",
        action: crypto,
    },
    CommandSpec {
        name: "theme",
        usage: "theme [name]",
        description: "List themes, or switch to one.",
        action: theme_cmd,
    },
    CommandSpec {
        name: "ls",
        usage: "ls",
        description: "List files.",
        action: ls,
    },
    CommandSpec {
        name: "cat",
        usage: "cat <file>",
        description: "Open a file (opens a window).",
        action: cat,
    },
    CommandSpec {
        name: "echo",
        usage: "echo [text...]",
        description: "Print the arguments.",
        action: echo,
    },
    CommandSpec {
        name: "cowsay",
        usage: "cowsay [text...]",
        description: "A talking cow.",
        action: cowsay,
    },
    CommandSpec {
        name: "whoami",
        usage: "whoami",
        description: "Print the current user.",
        action: whoami,
    },
    CommandSpec {
        name: "date",
        usage: "date",
        description: "Print the current date and time.",
        action: date,
    },
    CommandSpec {
        name: "sudo",
        usage: "sudo [command...]",
        description: "Try it.",
        action: sudo,
    },
    CommandSpec {
        name: "banner",
        usage: "banner",
        description: "Show the welcome banner.",
        action: banner,
    },
    CommandSpec {
        name: "clear",
        usage: "clear",
        description: "Clear the terminal.",
        action: clear,
    },
    CommandSpec {
        name: "cmatrix",
        usage: "cmatrix",
        description: "Enter the matrix (Esc to leave).",
        action: cmatrix,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        description: "Quit termfolio.",
        action: exit,
    },
];

fn usage(text: &str) -> Outcome {
    Outcome::Print(Block::from_lines(vec![Line::new(vec![
        Span::plain("Usage: "),
        Span::accent(text),
    ])]))
}

fn help(inv: &mut Invocation<'_>) -> Outcome {
    let mut block = Block::new().with(Line::styled("Available commands:", Class::Heading));
    for cmd in inv.registry.iter() {
        block.push(vec![
            Span::accent(format!("{:<width$}", cmd.name, width = NAME_COLUMN)),
            Span::plain(cmd.description),
        ]);
    }
    block.push(Line::styled(
        "Type 'man <command>' for details.",
        Class::Muted,
    ));
    Outcome::Print(block)
}

fn man(inv: &mut Invocation<'_>) -> Outcome {
    let Some(name) = inv.arg(0) else {
        return usage("man <command>");
    };
    let Some(cmd) = inv.registry.get(&name.to_lowercase()) else {
        return Outcome::Print(Block::error(format!("No manual entry for {name}")));
    };
    Outcome::Print(
        Block::new()
            .with(Line::styled("NAME", Class::Heading))
            .with(vec![
                Span::plain("    "),
                Span::accent(cmd.name),
                Span::plain(format!(" - {}", cmd.description)),
            ])
            .with(Line::styled("USAGE", Class::Heading))
            .with(Line::plain(format!("    {}", cmd.usage))),
    )
}

fn about(_: &mut Invocation<'_>) -> Outcome {
    Outcome::OpenModal {
        title: "about me".to_string(),
        body: content::about(),
    }
}

fn skills(_: &mut Invocation<'_>) -> Outcome {
    Outcome::OpenModal {
        title: "skills".to_string(),
        body: content::skills(),
    }
}

fn socials(inv: &mut Invocation<'_>) -> Outcome {
    Outcome::OpenModal {
        title: "socials".to_string(),
        body: content::socials(inv.config),
    }
}

fn github(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Remote(RemoteRequest::Repos)
}

fn email(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Remote(RemoteRequest::CopyEmail)
}

fn motd(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Remote(RemoteRequest::Quote)
}

fn crypto(inv: &mut Invocation<'_>) -> Outcome {
    match inv.arg(0) {
        Some(asset) => Outcome::Remote(RemoteRequest::Price {
            asset: asset.to_string(),
        }),
        None => usage("crypto <id>   (e.g. crypto bitcoin)"),
    }
}

fn history(inv: &mut Invocation<'_>) -> Outcome {
    let mut block = Block::new();
    for (i, line) in inv.history.iter().enumerate() {
        block.push(vec![
            Span::muted(format!("{:>4}  ", i + 1)),
            Span::plain(line),
        ]);
    }
    Outcome::Print(block)
}

fn theme_cmd(inv: &mut Invocation<'_>) -> Outcome {
    let Some(requested) = inv.arg(0).map(str::to_lowercase) else {
        let active = inv.theme.active_name();
        let mut line = vec![Span::plain("Available themes: ")];
        for (i, name) in theme::names().enumerate() {
            if i > 0 {
                line.push(Span::plain(", "));
            }
            if name == active {
                line.push(Span::accent(format!("{name} (active)")));
            } else {
                line.push(Span::plain(name));
            }
        }
        return Outcome::Print(
            Block::new()
                .with(line)
                .with(Line::styled("Usage: theme <name>", Class::Muted)),
        );
    };

    if inv.theme.apply(&requested) {
        Outcome::Print(Block::success(format!("Theme set to '{requested}'.")))
    } else {
        Outcome::Print(Block::error(format!(
            "Theme '{requested}' not found. Type 'theme' to list the available themes."
        )))
    }
}

fn ls(_: &mut Invocation<'_>) -> Outcome {
    let mut spans = Vec::new();
    for (i, name) in files::LISTING.iter().enumerate() {
        if i > 0 {
            spans.push(Span::plain("  "));
        }
        let class = if name.ends_with('/') {
            Class::PromptDir
        } else {
            Class::Plain
        };
        spans.push(Span::new(*name, class));
    }
    Outcome::Print(Block::from_lines(vec![Line::new(spans)]))
}

fn cat(inv: &mut Invocation<'_>) -> Outcome {
    let Some(name) = inv.arg(0) else {
        return usage("cat <file>");
    };
    match files::read(name, inv.config) {
        Some(body) => Outcome::OpenModal {
            title: name.to_string(),
            body,
        },
        None => Outcome::Print(Block::error(format!(
            "cat: {name}: No such file or directory"
        ))),
    }
}

fn echo(inv: &mut Invocation<'_>) -> Outcome {
    if inv.args.is_empty() {
        return Outcome::Print(Block::from_lines(vec![Line::blank()]));
    }
    Outcome::Print(Block::plain(&inv.args.join(" ")))
}

fn cowsay(inv: &mut Invocation<'_>) -> Outcome {
    let message = if inv.args.is_empty() {
        "Moo! Type 'help' to see what I can do.".to_string()
    } else {
        inv.args.join(" ")
    };
    Outcome::Print(content::cowsay(&message))
}

fn whoami(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Print(Block::plain("guest"))
}

fn date(_: &mut Invocation<'_>) -> Outcome {
    let now = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    Outcome::Print(Block::plain(&now.to_string()))
}

fn sudo(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Print(Block::error(
        "User not in the sudoers file. This incident will be reported.",
    ))
}

fn banner(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Banner
}

fn clear(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Clear
}

fn cmatrix(_: &mut Invocation<'_>) -> Outcome {
    Outcome::StartMatrix
}

fn exit(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Quit
}
