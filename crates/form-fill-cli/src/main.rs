mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use form_fill::{
    DataRecord, FillOutcome, FormData, FormType, GenerationOptions, GenerationRequest, Generator,
    OutputStore, PatientProfile, SchemaRegistry,
};
use logger::CliLogger;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "formfill", about = "Fill IBHS order forms from patient data", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every form in a request and print the report as JSON
    Generate {
        /// Request JSON ({"formData": {...}}) or, with --patient, a patient profile
        #[arg(short, long)]
        data: PathBuf,

        /// Treat --data as an extracted patient profile and generate both forms
        #[arg(long)]
        patient: bool,

        /// Options file (JSON)
        #[arg(short, long, env = "FORMFILL_CONFIG")]
        config: Option<PathBuf>,

        /// Directory for generated forms
        #[arg(long, env = "FORMFILL_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Directory holding the blank templates
        #[arg(long, env = "FORMFILL_TEMPLATES_DIR")]
        templates_dir: Option<PathBuf>,

        /// Field table overrides (JSON)
        #[arg(long, env = "FORMFILL_SCHEMA")]
        schema: Option<PathBuf>,
    },

    /// Fill one template
    Fill {
        #[arg(short, long, value_enum)]
        form: FormArg,

        /// Blank template PDF
        #[arg(short, long)]
        template: PathBuf,

        /// Data record JSON
        #[arg(short, long)]
        data: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Field table overrides (JSON)
        #[arg(long, env = "FORMFILL_SCHEMA")]
        schema: Option<PathBuf>,

        /// Template read timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Draw a form without a template
    Fallback {
        #[arg(short, long, value_enum)]
        form: FormArg,

        /// Data record JSON
        #[arg(short, long)]
        data: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate and print the field tables
    Schema {
        /// Only print this form
        #[arg(short, long, value_enum)]
        form: Option<FormArg>,

        /// Validate an override file instead of the built-in tables
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Copy a generated form out of the output directory
    Fetch {
        /// Generated file name, as listed in the report
        filename: String,

        /// Destination path
        #[arg(long)]
        to: PathBuf,

        /// Directory holding generated forms
        #[arg(long, env = "FORMFILL_OUTPUT_DIR", default_value = "./generated_forms")]
        output_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormArg {
    Ibhs,
    #[value(name = "communityCare", alias = "community-care")]
    CommunityCare,
}

impl From<FormArg> for FormType {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Ibhs => Self::Ibhs,
            FormArg::CommunityCare => Self::CommunityCare,
        }
    }
}

async fn load_registry(schema: Option<&Path>) -> Result<SchemaRegistry> {
    let registry = match schema {
        Some(path) => SchemaRegistry::from_json_file(path)
            .await
            .with_context(|| format!("loading field tables from {}", path.display()))?,
        None => SchemaRegistry::builtin()?,
    };
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Generate {
            data,
            patient,
            config,
            output_dir,
            templates_dir,
            schema,
        } => {
            let mut options = match &config {
                Some(path) => GenerationOptions::load(path).await?,
                None => GenerationOptions::default(),
            };
            if let Some(dir) = output_dir {
                options.output_dir = dir;
            }
            if let Some(dir) = templates_dir {
                options.templates_dir = dir;
            }

            let request = if patient {
                let profile = PatientProfile::load(&data).await?;
                GenerationRequest {
                    form_data: Some(FormData {
                        ibhs: Some(profile.to_record(FormType::Ibhs)),
                        community_care: Some(profile.to_record(FormType::CommunityCare)),
                    }),
                }
            } else {
                let bytes = tokio::fs::read(&data)
                    .await
                    .with_context(|| format!("reading {}", data.display()))?;
                serde_json::from_slice(&bytes).context("parsing generation request")?
            };

            let generator = Generator::new(load_registry(schema.as_deref()).await?, options)?;
            let report = generator.generate_all(&request).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Fill {
            form,
            template,
            data,
            output,
            schema,
            timeout,
        } => {
            let registry = load_registry(schema.as_deref()).await?;
            let record = DataRecord::load(&data).await?;
            let form_type = FormType::from(form);

            let outcome = form_fill::fill_template(
                &template,
                form_type.tag(),
                &record,
                &registry,
                std::time::Duration::from_secs(timeout),
            )
            .await?;

            match outcome {
                FillOutcome::Filled(document) => {
                    let pages = document.page_count();
                    tokio::fs::write(&output, document.into_bytes()).await?;
                    println!("Filled {} ({} pages) → {}", form_type, pages, output.display());
                }
                FillOutcome::Failed(reason) => bail!("Filling {} failed: {}", form_type, reason),
            }
        }

        Commands::Fallback { form, data, output } => {
            let record = DataRecord::load(&data).await?;
            let form_type = FormType::from(form);
            let document = form_fill::render_from_scratch_async(form_type, &record).await?;
            let pages = document.page_count();
            tokio::fs::write(&output, document.into_bytes()).await?;
            println!("Rendered {} ({} pages) → {}", form_type, pages, output.display());
        }

        Commands::Schema { form, file } => {
            let registry = load_registry(file.as_deref()).await?;
            let mut tables = registry.to_schema_file();
            if let Some(form) = form {
                let form_type = FormType::from(form);
                tables.0.retain(|t, _| *t == form_type);
            }
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }

        Commands::Fetch {
            filename,
            to,
            output_dir,
        } => {
            let store = OutputStore::new(output_dir);
            let bytes = store.read(&filename).await?;
            tokio::fs::write(&to, &bytes).await?;
            println!("Copied {} → {}", filename, to.display());
        }
    }

    Ok(())
}
