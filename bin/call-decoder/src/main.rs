use clap::Parser;
use desub_call::{catalog, CallDecoder, CallInput, CallRegistry, ModulesWithMethods, TypeResolver};
use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Decode a call against the functions of a runtime")]
struct Opts {
	/// Runtime metadata: SCALE encoded, as a 0x prefixed hex string, or a JSON catalog (`.json`)
	metadata: PathBuf,
	/// Call in the form 0x1a2b3c, call index first
	call: String,
	/// JSON type definitions to add to the bundled ones
	#[arg(short, long)]
	types: Option<PathBuf>,
	/// Pretty print the decoded call
	#[arg(short, long)]
	pretty: bool,
}

fn read_catalog(path: &Path) -> Result<ModulesWithMethods, anyhow::Error> {
	if path.extension().map_or(false, |ext| ext == "json") {
		let json = std::fs::read_to_string(path)?;
		return Ok(catalog::from_json(&json)?);
	}

	let bytes = std::fs::read(path)?;
	let bytes = match bytes.strip_prefix(b"0x") {
		Some(hex) => match hex::decode(String::from_utf8_lossy(hex).trim()) {
			Ok(bytes) => bytes,
			Err(e) => anyhow::bail!("Cannot decode hex metadata: {}", e),
		},
		None => bytes,
	};
	Ok(catalog::from_bytes(&bytes)?)
}

fn main() -> Result<(), anyhow::Error> {
	let opts = Opts::parse();
	pretty_env_logger::init();

	let registry = Arc::new(CallRegistry::new());
	registry.inject(read_catalog(&opts.metadata)?);
	log::info!("{} functions in the registry", registry.len());

	let types = match &opts.types {
		Some(path) => TypeResolver::builder().extend_from_json(&std::fs::read_to_string(path)?)?.build(),
		None => TypeResolver::default(),
	};

	let decoder = CallDecoder::new(registry, types);
	let call = match decoder.decode_call(CallInput::Hex(opts.call), None) {
		Ok(call) => call,
		Err(e) => anyhow::bail!("Cannot decode call: {}", e),
	};

	if call.meta().is_none() {
		log::warn!("Call index {} is not in the metadata", call.call_index());
	}

	let json = if opts.pretty { serde_json::to_string_pretty(&call)? } else { serde_json::to_string(&call)? };
	println!("{}", json);
	Ok(())
}
