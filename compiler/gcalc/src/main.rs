use clap::{Args, Parser, Subcommand};
use gcalc::{
    compile, evaluate_str, format_result, sweep_str, AngleMode, CalcError, CalculatorConfig,
    GraphBounds, Sweep,
};
use gcalc_lexer::{raw_position, tokenize_spanned, Token};
use gcalc_parser::parser::{render_source_snippet, Diagnostic, SyntaxError};
use log::{debug, info, LevelFilter};

#[derive(Debug, Parser)]
#[command(
    name = "gcalc",
    version,
    about = "Evaluate and graph calculator expressions",
    long_about = "gcalc evaluates arithmetic expressions with + - × ÷ ^, the functions\n\
        sin cos tan log ln √, the constants e and π, and the variable X.\n\n\
        ASCII spellings are accepted: * / pi sqrt x.\n\n\
        EXAMPLES:\n\
        \n  gcalc eval '2 + 3 * 4'                     Evaluate once\n\
        \n  gcalc eval --degrees 'sin(90)'             Trigonometry in degrees\n\
        \n  gcalc sweep 'X^2' --min-x=-2 --max-x=2     Print plottable x y pairs\n\
        \n  gcalc ast --json '1+2'                     Show the parsed tree\n\
        \n  gcalc repl                                 Start interactive session"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate an expression once, with X = 0
    Eval(EvalArgs),

    /// Sample an expression across a range of X
    #[command(
        long_about = "Evaluates the expression at evenly spaced X values across the\n\
            window and prints one 'x y' line for every sample that is finite\n\
            and inside the vertical bounds."
    )]
    Sweep(SweepArgs),

    /// Print the parsed expression tree
    Ast(AstArgs),

    /// Start an interactive session
    #[command(
        long_about = "Start an interactive session evaluating one expression per line.\n\n\
            Commands:\n\
            \n  :help   Show available commands\n\
            \n  :deg    Read trigonometric arguments as degrees\n\
            \n  :rad    Read trigonometric arguments as radians\n\
            \n  :quit   Exit (also :q, :exit)"
    )]
    Repl(ReplArgs),
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    /// Expression to evaluate; several words are joined with spaces
    #[arg(value_name = "EXPR", required = true, num_args = 1..)]
    expression: Vec<String>,

    /// Read trigonometric arguments as degrees
    #[arg(long)]
    degrees: bool,
}

#[derive(Debug, Args, Clone)]
struct SweepArgs {
    #[arg(value_name = "EXPR", required = true, num_args = 1..)]
    expression: Vec<String>,

    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    min_x: f64,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    max_x: f64,

    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    min_y: f64,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    max_y: f64,

    /// Width of the plotting surface in pixels
    #[arg(long, default_value_t = gcalc_eval::DEFAULT_GRAPH_WIDTH)]
    width: usize,

    /// Samples per pixel
    #[arg(long, default_value_t = gcalc_eval::DEFAULT_SAMPLES_PER_PIXEL)]
    samples: usize,

    #[arg(long)]
    degrees: bool,
}

#[derive(Debug, Args, Clone)]
struct AstArgs {
    #[arg(value_name = "EXPR", required = true, num_args = 1..)]
    expression: Vec<String>,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone, Default)]
struct ReplArgs {
    /// Start in degree mode
    #[arg(long)]
    degrees: bool,
}

fn angle_mode(degrees: bool) -> AngleMode {
    AngleMode::from_radians_flag(!degrees)
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level_for(verbose).as_str()),
    );
    builder.format_timestamp(None);
    // A second init (e.g. from tests) is harmless
    let _ = builder.try_init();
}

/// Render an error against the text it came from, caret included where the
/// position is known.
fn render_error(err: &CalcError, source: &str) -> String {
    match err {
        CalcError::Lex(e) => {
            let column = source
                .get(..e.offset)
                .map(|prefix| prefix.chars().count())
                .unwrap_or(0);
            format!("error: {e}\n  {source}\n  {}^", " ".repeat(column))
        }
        CalcError::Syntax(e) => match syntax_error_offset(e, source) {
            Some(offset) => render_source_snippet(&Diagnostic::from(e), source, offset),
            None => format!("error: {e}"),
        },
        CalcError::Evaluation(e) => format!("error: {e}"),
    }
}

/// Byte offset in `source` of the token a syntax error points at.
///
/// The parser counts normalized tokens, so the position is mapped back
/// through the digit runs onto the typed spans. Past the last token it is
/// the end of the last token.
fn syntax_error_offset(err: &SyntaxError, source: &str) -> Option<usize> {
    let spanned = tokenize_spanned(source).ok()?;
    let raw: Vec<Token> = spanned.iter().map(|(token, _)| token.clone()).collect();
    let offset = match spanned.get(raw_position(&raw, err.position)) {
        Some((_, span)) => span.start,
        None => spanned.last().map_or(0, |(_, span)| span.end),
    };
    Some(offset)
}

fn run_eval(args: &EvalArgs) -> i32 {
    let source = args.expression.join(" ");
    match evaluate_str(&source, angle_mode(args.degrees)) {
        Ok(value) => {
            println!("{}", format_result(value));
            if value.is_finite() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("{}", render_error(&e, &source));
            1
        }
    }
}

fn run_sweep(args: &SweepArgs) -> i32 {
    let source = args.expression.join(" ");
    let bounds = match GraphBounds::new(args.min_x, args.max_x, args.min_y, args.max_y) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let config = CalculatorConfig {
        angle_mode: angle_mode(args.degrees),
        bounds,
        width_px: args.width,
        samples_per_pixel: args.samples,
    };
    let sweep: Sweep = config.sweep();

    match sweep_str(&source, config.angle_mode, &sweep) {
        Ok(samples) => {
            let mut plotted = 0usize;
            for sample in samples.iter().filter(|s| s.is_plottable(&bounds)) {
                println!("{} {}", sample.x, sample.y);
                plotted += 1;
            }
            info!("{plotted} of {} samples inside the window", samples.len());
            0
        }
        Err(e) => {
            eprintln!("{}", render_error(&e, &source));
            1
        }
    }
}

fn run_ast(args: &AstArgs) -> i32 {
    let source = args.expression.join(" ");
    let tree = match compile(&source) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}", render_error(&e, &source));
            return 1;
        }
    };
    if !args.json {
        println!("{tree}");
        return 0;
    }
    match gcalc_ast::to_json(&tree) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize tree: {e}");
            2
        }
    }
}

#[derive(Debug)]
struct ReplSession {
    mode: AngleMode,
}

impl ReplSession {
    fn new(mode: AngleMode) -> Self {
        Self { mode }
    }

    fn prompt(&self) -> &'static str {
        match self.mode {
            AngleMode::Radians => "gcalc[rad]> ",
            AngleMode::Degrees => "gcalc[deg]> ",
        }
    }

    fn handle_command(&mut self, command: &str) -> (Vec<String>, bool) {
        match command {
            ":help" => (
                vec![
                    "commands: :help, :quit, :deg, :rad".to_string(),
                    "enter an expression such as 2×(3+4) or sin(π÷6); X is 0".to_string(),
                ],
                false,
            ),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":deg" => {
                self.mode = AngleMode::Degrees;
                (vec!["angle mode: Degrees".to_string()], false)
            }
            ":rad" => {
                self.mode = AngleMode::Radians;
                (vec!["angle mode: Radians".to_string()], false)
            }
            other => (vec![format!("error: unknown command '{other}'")], false),
        }
    }

    /// Returns the lines to print and whether the session should end
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }
        debug!("repl input: {trimmed:?}");
        let out = match evaluate_str(trimmed, self.mode) {
            Ok(value) => format_result(value),
            Err(e) => render_error(&e, trimmed),
        };
        (out.lines().map(str::to_string).collect(), false)
    }
}

fn run_repl(args: &ReplArgs) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new(angle_mode(args.degrees));
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 2 } else { 0 };
        }
    };
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Repl(ReplArgs::default())) {
        Command::Eval(args) => run_eval(&args),
        Command::Sweep(args) => run_sweep(&args),
        Command::Ast(args) => run_ast(&args),
        Command::Repl(args) => run_repl(&args),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn eval_joins_expression_words() {
        let cli = Cli::try_parse_from(["gcalc", "eval", "--degrees", "sin(", "90", ")"]).unwrap();
        let Some(Command::Eval(args)) = cli.command else {
            panic!("expected eval");
        };
        assert!(args.degrees);
        assert_eq!(args.expression.join(" "), "sin( 90 )");
    }

    #[test]
    fn sweep_accepts_negative_bounds() {
        let cli = Cli::try_parse_from([
            "gcalc", "sweep", "X^2", "--min-x", "-2", "--max-x", "2", "--width", "8",
        ])
        .unwrap();
        let Some(Command::Sweep(args)) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.min_x, -2.0);
        assert_eq!(args.max_x, 2.0);
        assert_eq!(args.min_y, -10.0);
        assert_eq!(args.width, 8);
        assert_eq!(args.samples, 5);
    }

    #[test]
    fn verbosity_counts_and_maps_to_levels() {
        let cli = Cli::try_parse_from(["gcalc", "-vv", "repl"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn inverted_sweep_window_is_a_usage_error() {
        let args = SweepArgs {
            expression: vec!["X".to_string()],
            min_x: 1.0,
            max_x: -1.0,
            min_y: -10.0,
            max_y: 10.0,
            width: 10,
            samples: 1,
            degrees: false,
        };
        assert_eq!(run_sweep(&args), 2);
    }

    #[test]
    fn syntax_errors_render_with_caret() {
        let err = compile("(1+2").unwrap_err();
        let rendered = render_error(&err, "(1+2");
        assert!(rendered.starts_with("error: missing closing parenthesis\n  (1+2\n      ^"));
    }

    #[test]
    fn syntax_errors_show_what_was_typed() {
        let err = compile("sin 3").unwrap_err();
        assert_eq!(
            render_error(&err, "sin 3").lines().take(3).collect::<Vec<_>>(),
            vec!["error: function without parentheses: sin", "  sin 3", "      ^"]
        );

        // π×2+ once normalized; the caret lands after the typed text
        let err = compile("pi*2+").unwrap_err();
        assert_eq!(
            render_error(&err, "pi*2+").lines().take(3).collect::<Vec<_>>(),
            vec!["error: unexpected end of input", "  pi*2+", "       ^"]
        );

        // Multi-digit literals are one token to the parser
        let err = compile("12 + 345 )").unwrap_err();
        assert_eq!(
            render_error(&err, "12 + 345 )").lines().nth(2),
            Some("           ^")
        );
    }

    #[test]
    fn lex_errors_point_at_offset() {
        let err = compile("1 + q").unwrap_err();
        assert_eq!(
            render_error(&err, "1 + q"),
            "error: unrecognized input \"q\" at offset 4\n  1 + q\n      ^"
        );
    }

    #[test]
    fn repl_help_and_quit() {
        let mut s = ReplSession::new(AngleMode::Radians);
        let (out, exit) = s.handle_line(":help");
        assert!(!exit);
        assert!(out[0].contains(":deg"));

        let (_out, exit) = s.handle_line(":quit");
        assert!(exit);
    }

    #[test]
    fn repl_switches_angle_mode() {
        let mut s = ReplSession::new(AngleMode::Radians);
        assert_eq!(s.prompt(), "gcalc[rad]> ");
        s.handle_line(":deg");
        assert_eq!(s.prompt(), "gcalc[deg]> ");
        let (out, _) = s.handle_line("cos(180)");
        assert_eq!(out, vec!["-1.0".to_string()]);
    }

    #[test]
    fn repl_evaluates_and_reports_errors() {
        let mut s = ReplSession::new(AngleMode::Radians);
        assert_eq!(s.handle_line("2 + 3 * 4").0, vec!["14.0".to_string()]);
        assert_eq!(s.handle_line("1/0").0, vec!["Error".to_string()]);
        assert_eq!(s.handle_line("   ").0, Vec::<String>::new());

        let (out, exit) = s.handle_line("sin 3");
        assert!(!exit);
        assert_eq!(out[0], "error: function without parentheses: sin");

        let (out, _) = s.handle_line(":bogus");
        assert_eq!(out, vec!["error: unknown command ':bogus'".to_string()]);
    }
}
