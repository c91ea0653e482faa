use portfolio_sentinel::{Config, cleanup_password_resets, create_admin};
use tracing_subscriber::EnvFilter;

fn print_usage(bin_name: &str) {
    eprintln!("Usage:");
    eprintln!("  {bin_name} create-admin <email> <name>   (password read from ADMIN_PASSWORD)");
    eprintln!("  {bin_name} cleanup-password-resets");
}

fn init_tracing(log_level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    if json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

enum Command {
    CreateAdmin { email: String, name: String },
    CleanupPasswordResets,
}

fn parse_command(args: &[String]) -> Option<Command> {
    match args {
        [command, email, name] if command == "create-admin" => Some(Command::CreateAdmin {
            email: email.clone(),
            name: name.clone(),
        }),
        [command] if command == "cleanup-password-resets" => Some(Command::CleanupPasswordResets),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args();
    let bin_name = args.next().unwrap_or_else(|| "admin".to_string());
    let rest: Vec<String> = args.collect();

    let Some(command) = parse_command(&rest) else {
        print_usage(&bin_name);
        std::process::exit(2);
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json_format);

    match command {
        Command::CreateAdmin { email, name } => {
            let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
                eprintln!("ADMIN_PASSWORD must be set");
                std::process::exit(2);
            };

            match create_admin(&config, &email, &name, &password).await {
                Ok(admin) => {
                    println!("Created admin user: id={}, email={}", admin.id, admin.email);
                    if !admin.allowed {
                        eprintln!("Warning: {} is not listed in admin.emails and will be refused at login", admin.email);
                    }
                }
                Err(err) => {
                    eprintln!("create-admin failed: {err}");
                    std::process::exit(1);
                }
            }
        }
        Command::CleanupPasswordResets => match cleanup_password_resets(&config).await {
            Ok(removed) => println!("Password reset cleanup completed: removed={removed}"),
            Err(err) => {
                eprintln!("cleanup-password-resets failed: {err}");
                std::process::exit(1);
            }
        },
    }
}
