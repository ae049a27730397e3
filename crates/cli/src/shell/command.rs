pub const REMOVE_USAGE: &str = "usage: .remove N";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resolve(String),
    Exit,
    Clear,
    List,
    Remove(usize),
    Usage(&'static str),
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if !line.starts_with('.') || line == "." {
            return Command::Resolve(line.to_string());
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            ".exit" => Command::Exit,
            ".clear" => Command::Clear,
            ".list" => Command::List,
            ".remove" => match args.as_slice() {
                [index] => index
                    .parse()
                    .map(Command::Remove)
                    .unwrap_or(Command::Usage(REMOVE_USAGE)),
                _ => Command::Usage(REMOVE_USAGE),
            },
            other => Command::Unknown(other.to_string()),
        }
    }
}
