// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .help("Record id or a unique prefix of it")
}

/// Editor fields shared by `license add` and `license edit`.
fn record_fields(cmd: Command, creating: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(creating))
        .arg(Arg::new("vendor").long("vendor"))
        .arg(
            Arg::new("category")
                .long("category")
                .required(creating)
                .help("One of the fixed categories, e.g. Productivity, Entertainment, Other"),
        )
        .arg(Arg::new("cost").long("cost").required(creating).allow_hyphen_values(true))
        .arg(Arg::new("currency").long("currency").help("Currency code, default USD"))
        .arg(
            Arg::new("cycle")
                .long("cycle")
                .help("monthly | annual | one-time (default monthly)"),
        )
        .arg(Arg::new("purchase-date").long("purchase-date").help("YYYY-MM-DD"))
        .arg(Arg::new("renewal").long("renewal").help("Next renewal, YYYY-MM-DD"))
        .arg(Arg::new("payment").long("payment").help("Payment method"))
        .arg(
            Arg::new("status")
                .long("status")
                .help("active | expired | cancelled (default active)"),
        )
        .arg(Arg::new("notes").long("notes"))
        .arg(
            Arg::new("daily")
                .long("daily")
                .action(ArgAction::SetTrue)
                .help("Daily spend: counted this month, never projected over the year"),
        )
        .arg(
            Arg::new("not-daily")
                .long("not-daily")
                .action(ArgAction::SetTrue)
                .conflicts_with("daily"),
        )
}

pub fn build_cli() -> Command {
    Command::new("licensehub")
        .version(clap::crate_version!())
        .about("Track subscriptions, bills and daily spend across work and personal tabs")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Act as this user for one command instead of the signed-in one"),
        )
        .arg(
            Arg::new("tab")
                .long("tab")
                .global(true)
                .help("work | personal; defaults to the last tab used"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("session")
                .about("Sign in and out")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("id").required(true).help("User id"))
                        .arg(
                            Arg::new("no-seed")
                                .long("no-seed")
                                .action(ArgAction::SetTrue)
                                .help("Do not load demo records into empty tabs"),
                        ),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("tab")
                .about("Switch between work and personal")
                .subcommand(Command::new("use").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("license")
                .about("Add, edit and list records in the active tab")
                .subcommand(record_fields(Command::new("add"), true))
                .subcommand(record_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("paid")
                        .about("Mark as paid and move the renewal date forward one cycle")
                        .arg(id_arg()),
                ),
        )
        .subcommand(json_flags(
            Command::new("stats").about("Spend by currency, balance, projection and breakdown"),
        ))
        .subcommand(
            Command::new("income")
                .about("Monthly income used for balance and savings")
                .subcommand(
                    Command::new("set").arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("savings")
                .about("Savings goal and plan")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("months").long("months").required(true)),
                )
                .subcommand(json_flags(Command::new("plan"))),
        )
        .subcommand(
            Command::new("theme")
                .about("Accent and background gradients, dark or light mode")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(Command::new("css"))
                .subcommand(Command::new("presets"))
                .subcommand(Command::new("preset").arg(Arg::new("name").required(true)))
                .subcommand(gradient_cmd("accent"))
                .subcommand(gradient_cmd("bg"))
                .subcommand(Command::new("reset"))
                .subcommand(Command::new("mode").arg(Arg::new("mode").required(true))),
        )
        .subcommand(
            Command::new("config")
                .about("Device settings (usd_rate)")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for problems"))
}

fn gradient_cmd(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("colors")
                .long("colors")
                .value_delimiter(',')
                .num_args(1..)
                .help("Comma-separated #rrggbb colors, 1 to 5"),
        )
        .arg(
            Arg::new("angle")
                .long("angle")
                .value_parser(value_parser!(u32)),
        )
}
