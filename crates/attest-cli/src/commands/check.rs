use crate::cli::EvalArgs;
use crate::commands::evaluation_payload;
use crate::support::{compile_or_exit, load_formatter_or_exit, render_json_or_exit};
use attest_contract::{Formatter, confirm_with};

const CHECK_KIND: &str = "attest.check.v1";

pub fn run(args: EvalArgs) {
    let expression = compile_or_exit(&args);
    let formatter = load_formatter_or_exit(&args.config);

    match confirm_with(&expression, &formatter) {
        Ok(evaluation) => {
            if args.json {
                let payload = evaluation_payload(CHECK_KIND, &args.rules, &evaluation);
                println!("{}", render_json_or_exit(&payload, "check"));
            } else {
                println!("{}", formatter.format(&evaluation));
                println!("check passed: {}", evaluation.name());
            }
        }
        Err(violation) => {
            if args.json {
                let payload = evaluation_payload(CHECK_KIND, &args.rules, violation.evaluation());
                println!("{}", render_json_or_exit(&payload, "check"));
            } else {
                println!("{}", violation.report());
            }
            std::process::exit(1);
        }
    }
}
