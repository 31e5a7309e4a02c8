//! Command line driver: prove a TPTP problem and report an SZS status

use clap::{ArgAction, Parser, ValueEnum};
use clausal::json::{ProofJson, RunResultJson};
use clausal::{
    add_equality_axioms, parse_problem_file, ClausificationMode, Heuristic, LitSelection,
    Problem, ProofState, ProofStatistics, ProverConfig, ProverError, SearchParams, Session,
    SzsStatus,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProofFormat {
    /// Numbered steps with their parents
    Text,
    /// TPTP `cnf` lines with inference annotations
    Tptp,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TPTP problem file
    problem: PathBuf,

    /// JSON configuration file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time limit in seconds
    #[arg(short, long)]
    timeout: Option<f64>,

    /// Clause selection heuristic (FIFO, SymbolCount, PickGiven5, PickGiven2)
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Literal selection strategy (first, smallest, largest, varsize, eqressize)
    #[arg(long)]
    selection: Option<LitSelection>,

    #[arg(long)]
    no_tautologies: bool,

    #[arg(long)]
    no_forward: bool,

    #[arg(long)]
    no_backward: bool,

    /// Use linear scans instead of the clause indices
    #[arg(long)]
    no_indexing: bool,

    /// Stop with ResourceOut once this many clauses are held
    #[arg(long)]
    max_clauses: Option<usize>,

    /// Clausification pipeline (standard, small)
    #[arg(long)]
    clausification: Option<ClausificationMode>,

    /// Directory searched for included files, may be repeated
    #[arg(short = 'I', long = "include")]
    include_dirs: Vec<PathBuf>,

    /// Never add equality axioms
    #[arg(long)]
    no_equality: bool,

    /// Run once for every combination of the deletion and indexing switches
    #[arg(long)]
    all_opts: bool,

    /// Print the proof when one is found
    #[arg(long, value_enum)]
    proof: Option<ProofFormat>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Result<ProverConfig, ProverError> {
        let mut config = match &self.config {
            Some(path) => ProverConfig::from_file(path)?,
            None => ProverConfig::default(),
        };
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(heuristic) = self.heuristic {
            config.search.heuristics = heuristic;
        }
        if self.selection.is_some() {
            config.search.literal_selection = self.selection;
        }
        config.search.delete_tautologies &= !self.no_tautologies;
        config.search.forward_subsumption &= !self.no_forward;
        config.search.backward_subsumption &= !self.no_backward;
        config.search.indexing &= !self.no_indexing;
        if let Some(max) = self.max_clauses {
            config.search.max_clauses = max;
        }
        if let Some(mode) = self.clausification {
            config.clausification = mode;
        }
        config.include_dirs.extend(self.include_dirs.iter().cloned());
        config.equality_axioms &= !self.no_equality;
        config.validate()?;
        Ok(config)
    }
}

/// Result of one search
struct Attempt {
    params: SearchParams,
    statistics: ProofStatistics,
    proof: Option<clausal::Proof>,
    error: Option<ProverError>,
}

impl Attempt {
    fn status(&self) -> SzsStatus {
        self.statistics.status
    }

    fn to_json(&self, problem: &str) -> RunResultJson {
        RunResultJson {
            problem: problem.to_string(),
            status: self.status(),
            options: self.params.summary(),
            statistics: self.statistics.clone(),
            proof: self.proof.as_ref().map(ProofJson::from),
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

fn attempt(problem: &Problem, config: &ProverConfig, params: SearchParams) -> Attempt {
    let mut session = Session::new();
    let mut clauses = problem
        .clone()
        .into_clause_set(config.clausification, &mut session);
    if config.equality_axioms {
        add_equality_axioms(&mut clauses, &mut session);
    }

    let mut state = ProofState::with_session(params.clone(), clauses, session);
    state.set_conjecture(problem.has_conjecture());
    info!("searching with {}", params.summary());

    let (proof, error) = match state.saturate(config.timeout()) {
        Ok(witness) => (witness.map(|w| state.proof(&w)), None),
        Err(e) => {
            warn!("{}", e);
            (None, Some(e))
        }
    };
    Attempt {
        params,
        statistics: state.statistics().clone(),
        proof,
        error,
    }
}

fn problem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn report(name: &str, attempt: &Attempt, format: Option<ProofFormat>) {
    println!("% SZS status {} for {}", attempt.status(), name);
    if let Some(error) = &attempt.error {
        println!("% {}", error);
    }
    for line in attempt.statistics.to_string().lines() {
        println!("% {}", line);
    }
    if let (Some(proof), Some(format)) = (&attempt.proof, format) {
        println!("% SZS output start CNFRefutation for {}", name);
        match format {
            ProofFormat::Text => print!("{}", proof),
            ProofFormat::Tptp => proof.to_tptp_lines().iter().for_each(|l| println!("{}", l)),
        }
        println!("% SZS output end CNFRefutation for {}", name);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    let name = problem_name(&args.problem);

    let loaded = args.config().and_then(|config| {
        let problem = parse_problem_file(&args.problem, &config.include_dirs)?;
        Ok((config, problem))
    });
    let (config, problem) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("% SZS status {} for {}", e.szs_status(), name);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("{} statements read from {}", problem.len(), args.problem.display());

    let runs = if args.all_opts {
        config.search.all_option_combinations()
    } else {
        vec![config.search.clone()]
    };

    let attempts: Vec<Attempt> = runs
        .into_iter()
        .map(|params| attempt(&problem, &config, params))
        .collect();

    if args.json {
        let results: Vec<RunResultJson> = attempts.iter().map(|a| a.to_json(&name)).collect();
        let rendered = if args.all_opts {
            serde_json::to_string_pretty(&results)
        } else {
            serde_json::to_string_pretty(&results[0])
        };
        match rendered {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("cannot serialize result: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else if args.all_opts {
        for attempt in &attempts {
            println!(
                "% {:<32} {:<20} {:>8} given {:>9.3}s",
                attempt.params.summary(),
                attempt.status().as_str(),
                attempt.statistics.processed_clauses,
                attempt.statistics.elapsed.as_secs_f64()
            );
        }
    } else {
        report(&name, &attempts[0], args.proof);
    }

    ExitCode::SUCCESS
}
