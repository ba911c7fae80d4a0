//--> Imports <--

use std::{
	env,
	fs::{
		self,
		File,
	},
	io::{
		self,
		BufReader,
		Write,
	},
	path::PathBuf,
	process,
};

use clap::{
	error::ErrorKind,
	Arg,
};

use tracing::Level;

use ippcode24::{
	LineSource,
	Parser,
	Reader,
	XmlEmitter,
};

//--> Constants <--

const INVOCATION_ERROR: i32 = 10;

const INPUT_ERROR: i32 = 11;

const OUTPUT_ERROR: i32 = 12;

//--> Functions <--

fn main() {
	let command = {
		clap::command!()
		.long_about(
			"Reads IPPcode24 source code, checks its lexical and syntactic correctness \
			and writes its XML representation.\n\n\
			The source is read from INPATH, or from standard input if no path is given. \
			The XML goes to standard output unless an output path is given.\n\n\
			Exit codes:\n\t\
			- 0: success\n\t\
			- 10: invalid arguments\n\t\
			- 11: the input couldn't be read\n\t\
			- 12: the output couldn't be written\n\t\
			- 21: missing or misplaced header\n\t\
			- 22: unknown opcode, or wrong operands for a known one\n\t\
			- 23: any other lexical or syntax error"
		)
		.args([
			{
				Arg::new("verbose")
				.short('v')
				.long("verbose")
				.help("Logs every accepted instruction to standard error, rather than just errors.")
			},
			{
				Arg::new("output")
				.short('o')
				.long("out")
				.value_name("OUTPATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Writes the XML to this path instead of standard output.")
			},
			{
				Arg::new("input")
				.value_name("INPATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Path to the source file. By default, the source is read from standard input.")
			}
		])
	};

	let args = match command.try_get_matches() {
		Ok(args) => args,
		Err(err) => {
			match err.kind() {
				// help and version are only honoured on their own
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion if env::args_os().len() > 2 => {
					eprintln!("ERR: --help and --version can't be combined with other arguments");
					process::exit(INVOCATION_ERROR);
				},
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
					err.print().ok();
					process::exit(0);
				},
				_ => {
					err.print().ok();
					process::exit(INVOCATION_ERROR);
				}
			}
		}
	};

	let verbose = args.contains_id("verbose");

	tracing_subscriber::fmt()
		.with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
		.with_writer(io::stderr)
		.init();

	let output_path = args.get_one::<PathBuf>("output").cloned();

	let code = match args.get_one::<PathBuf>("input") {
		Some(path) => match File::open(path) {
			Ok(file) => {
				tracing::info!("reading {}", path.display());
				translate(Reader::new(BufReader::new(file)), output_path)
			},
			Err(err) => {
				eprintln!("ERR: {}: couldn't open the input: {}", path.display(), err);
				INPUT_ERROR
			}
		},
		None => translate(Reader::new(io::stdin().lock()), output_path)
	};

	process::exit(code);
}

fn translate<S: LineSource>(source: S, output_path: Option<PathBuf>) -> i32 {
	let xml = match Parser::new(source).run(XmlEmitter::new(Vec::new())) {
		Ok(Ok(xml)) => xml,
		Ok(Err(err)) => {
			eprintln!("ERR: couldn't render the XML: {}", err);
			return OUTPUT_ERROR;
		},
		Err(err) => {
			eprintln!("ERR: {}: {}", err.class(), err);
			return err.exit_code();
		}
	};

	let written = match &output_path {
		Some(path) => fs::write(path, &xml),
		None => io::stdout().lock().write_all(&xml)
	};

	match written {
		Ok(()) => {
			match output_path {
				Some(path) => tracing::info!("the XML was output at '{}'", path.display()),
				None => tracing::info!("the XML was output to standard output"),
			}

			0
		},
		Err(err) => {
			eprintln!("ERR: couldn't write the output: {}", err);
			OUTPUT_ERROR
		}
	}
}
