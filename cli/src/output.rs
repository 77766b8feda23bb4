use colored::Colorize;
use fl_core::ProvisionOutcome;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a provisioning outcome; the no-op cases render dimmed so a
/// repeated request is visibly distinct from a fresh write.
pub fn outcome(action: &str, outcome: ProvisionOutcome) {
    if outcome.changed() {
        success(action);
    } else {
        println!("{} {} ({})", "•".dimmed(), action.dimmed(), outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_helpers_do_not_panic() {
        header("Header");
        hint("a hint");
        success("done");
        outcome("granted", ProvisionOutcome::AlreadyGranted);
        outcome("granted", ProvisionOutcome::Granted);
    }
}
