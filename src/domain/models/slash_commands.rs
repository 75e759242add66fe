#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_clear()
            || cmd.is_cancel()
            || cmd.is_suggestions()
            || cmd.is_suggest()
            || cmd.is_copy()
            || cmd.is_voice()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Parses the first argument as a 1-based position.
    pub fn number_arg(&self) -> Option<usize> {
        return self.args.first()?.parse::<usize>().ok();
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/cl", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_cancel(&self) -> bool {
        return ["/x", "/cancel"].contains(&self.command.as_str());
    }

    pub fn is_suggestions(&self) -> bool {
        return ["/s", "/suggestions"].contains(&self.command.as_str());
    }

    pub fn is_suggest(&self) -> bool {
        return ["/sg", "/suggest"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_voice(&self) -> bool {
        return ["/v", "/voice"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
