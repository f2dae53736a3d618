use clap::Parser;
use pl0tree::{
    ast::Node,
    passes::{resolve_names, ConstantFolder, StatementCounter},
    samples::{self, Sample, SAMPLE_NAMES},
};
use pl0tree::errors::{Pl0Error, Pl0Result};
use std::time::Instant;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Builds and inspects PL/0 statement trees",
    long_about = "Builds and inspects PL/0 statement trees.\n\
                 Renders one of the built-in sample programs and optionally runs\n\
                 name resolution, constant folding and statement counting over it.\n\
                 \n\
                 Example usage:\n\
                 pl0tree swap                      # Render the swap sample\n\
                 pl0tree guarded --level 1         # Render indented one level\n\
                 pl0tree nested --resolve          # Bind names, report unresolved ones\n\
                 pl0tree nested -O                 # Fold constant expressions\n\
                 pl0tree broken --count            # Count executed statements"
)]
struct Cli {
    // Sample program to build
    #[arg(value_parser = validate_sample)]
    sample: String,

    // Indentation level of the rendering
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    // Run name resolution before rendering
    #[arg(short, long)]
    resolve: bool,

    // Fold constant expressions before rendering
    #[arg(short = 'O', long)]
    optimize: bool,

    // Count the statements of the tree
    #[arg(short, long)]
    count: bool,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

// Validate sample argument
fn validate_sample(s: &str) -> Result<String, String> {
    if SAMPLE_NAMES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!("Unknown sample: {}. Available: {}", s, SAMPLE_NAMES.join(", ")))
    }
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

// Bind names; returns the diagnostics the resolver collected
fn resolution_phase(sample: &mut Sample, verbose: bool) -> Pl0Result<Vec<Pl0Error>> {
    let start = Instant::now();
    let diagnostics = resolve_names(&mut sample.program, &sample.table)?;
    if verbose {
        println!(
            "Name resolution completed in {:.3}s with {} diagnostic(s)",
            start.elapsed().as_secs_f64(),
            diagnostics.len()
        );
    }
    Ok(diagnostics)
}

fn folding_phase(sample: &mut Sample, verbose: bool) -> Pl0Result<()> {
    let start = Instant::now();
    let mut folder = ConstantFolder::new();
    sample.program.accept_mut(&mut folder)?;
    if verbose {
        println!(
            "Constant folding completed in {:.3}s, {} slot(s) rewritten",
            start.elapsed().as_secs_f64(),
            folder.rewrites()
        );
    }
    Ok(())
}

fn counting_phase(sample: &Sample) -> Pl0Result<StatementCounter> {
    let mut counter = StatementCounter::new();
    sample.program.accept(&mut counter)?;
    Ok(counter)
}

fn run(args: &Cli) -> Pl0Result<Vec<Pl0Error>> {
    let mut sample = samples::build(&args.sample)?;
    if args.verbose {
        println!("Built sample '{}' ({} scope(s), {} procedure(s))",
                 sample.name, sample.table.scope_count(), sample.table.procedure_count());
    }

    let diagnostics = if args.resolve {
        resolution_phase(&mut sample, args.verbose)?
    } else {
        Vec::new()
    };

    if args.optimize {
        folding_phase(&mut sample, args.verbose)?;
    }

    println!("{}", sample.program.render(args.level));

    if args.count {
        let counter = counting_phase(&sample)?;
        println!("\nStatements executed: {}", counter.executed());
        println!("Error statements:    {}", counter.errors());
    }

    Ok(diagnostics)
}

fn main() {
    let args = Cli::parse();

    match run(&args) {
        Ok(diagnostics) => {
            if diagnostics.is_empty() {
                if args.verbose {
                    println!("Done.");
                }
                return;
            }
            for diagnostic in &diagnostics {
                eprintln!("{}", diagnostic);
            }
            fatal(&format!("{} unresolved name(s)", diagnostics.len()));
        }
        Err(e) => fatal(&format!("Tree construction failed: {}", e)),
    }
}
