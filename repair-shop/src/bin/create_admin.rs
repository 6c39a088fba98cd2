//! Provisions a staff account: `create-admin <email> <password> <full name>`.
use colored::Colorize;
use domain_repair::{command::RegisterUserCommand, exception::RepairException};
use infrastructure_common::config::build_config;
use repair_shop::infrastructure::ServiceProvider;

#[tokio::main]
async fn main() {
    let args = std::env::args()
        .skip(1)
        .filter(|arg| !arg.ends_with("yaml") && !arg.ends_with("yml"))
        .collect::<Vec<_>>();
    let [email, password, full_name @ ..] = args.as_slice() else {
        return eprintln!("{}: create-admin <email> <password> <full name>", "Usage".yellow());
    };
    if full_name.is_empty() {
        return eprintln!("{}: create-admin <email> <password> <full name>", "Usage".yellow());
    }
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => return eprintln!("{}: {}", "Cannot build config".red(), e),
    };
    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => x,
        Err(e) => return eprintln!("{}: {}", "Cannot build Service Provider".red(), e),
    };
    let command = RegisterUserCommand {
        name: Some(full_name.join(" ")),
        email: Some(email.clone()),
        password: Some(password.clone()),
    };
    match service_provider.auth_service.register(command).await {
        Ok(user) => println!("{} {} ({})", "Created".green(), user.email, user.id),
        Err(RepairException::EmailTaken) => {
            println!("{} {email} already exists", "Skipped".yellow())
        }
        Err(e) => {
            eprintln!("{}: {}", "Cannot create account".red(), e);
            std::process::exit(1);
        }
    }
}
