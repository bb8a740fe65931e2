use crate::cli::EvalArgs;
use crate::commands::evaluation_payload;
use crate::support::{compile_or_exit, load_formatter_or_exit, render_json_or_exit};
use attest_contract::{Formatter, format_cause};

const EVAL_KIND: &str = "attest.eval.v1";

pub fn run(args: EvalArgs) {
    let expression = compile_or_exit(&args);
    tracing::debug!(rules = %args.rules, nodes = expression.size(), "compiled rules");
    let evaluation = expression.evaluate();

    if args.json {
        let payload = evaluation_payload(EVAL_KIND, &args.rules, &evaluation);
        println!("{}", render_json_or_exit(&payload, "eval"));
        return;
    }

    let formatter = load_formatter_or_exit(&args.config);
    println!("{}", formatter.format(&evaluation));
    println!("outcome: {}", evaluation.outcome());
    if let Some(cause) = evaluation.failed().then(|| evaluation.root_cause()).flatten() {
        println!("root cause: {}", format_cause(&cause));
    }
}
