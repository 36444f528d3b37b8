use modwhy::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
use modwhy::adapters::outbound::filesystem::FileGraphSource;
use modwhy::adapters::outbound::network::{
    resolve_proxy_url, CachingVersionRepository, GoProxyClient,
};
use modwhy::adapters::outbound::toolchain::GoModuleGraphSource;
use modwhy::application::dto::{ExplainRequest, InspectRequest};
use modwhy::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use modwhy::application::use_cases::{ExplainModuleUseCase, InspectGraphUseCase};
use modwhy::cli::Args;
use modwhy::config::{self, Settings};
use modwhy::ports::outbound::{ModuleGraphSource, ProgressReporter};
use modwhy::shared::error::ExitCode;
use modwhy::shared::security::validate_project_directory;
use modwhy::shared::Result;
use std::io::IsTerminal;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    validate_project_directory(&args.path)?;

    let settings = Settings::resolve(&args, config::load_for_args(&args)?)?;

    // Dispatch once on the concrete adapters; the use cases are generic
    match &args.graph_file {
        Some(graph_file) => {
            let source = FileGraphSource::new(graph_file.clone(), args.indirect_file.clone());
            if args.quiet {
                execute(&args, &settings, source, QuietProgressReporter::new()).await
            } else {
                execute(&args, &settings, source, StderrProgressReporter::new()).await
            }
        }
        None => {
            let source = GoModuleGraphSource::new(settings.go_binary.clone());
            if args.quiet {
                execute(&args, &settings, source, QuietProgressReporter::new()).await
            } else {
                execute(&args, &settings, source, StderrProgressReporter::new()).await
            }
        }
    }
}

async fn execute<GS, PR>(args: &Args, settings: &Settings, source: GS, reporter: PR) -> Result<()>
where
    GS: ModuleGraphSource,
    PR: ProgressReporter,
{
    let color = !args.no_color && settings.output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(settings.format, color);
    let progress_message = FormatterFactory::progress_message(settings.format);

    let output = if args.print {
        let use_case = InspectGraphUseCase::new(source, reporter);
        let request = InspectRequest::new(&args.path, args.module.clone())
            .with_exclude_patterns(settings.exclude_patterns.clone());
        let view = use_case.execute(request).await?;
        if !args.quiet {
            eprintln!("{}", progress_message);
        }
        formatter.format_graph(&view)?
    } else {
        let module = args
            .module
            .clone()
            .ok_or_else(|| anyhow::anyhow!("MODULE is required unless --print is given"))?;

        let version_repository = if settings.show_latest {
            let proxy_url = resolve_proxy_url(
                settings.proxy_url.as_deref(),
                std::env::var("GOPROXY").ok().as_deref(),
            );
            let client = GoProxyClient::new(&proxy_url, settings.timeout)?;
            Some(CachingVersionRepository::new(client))
        } else {
            None
        };

        let use_case = ExplainModuleUseCase::new(source, version_repository, reporter);
        let request = ExplainRequest::new(&args.path, module)
            .with_show_latest(settings.show_latest)
            .with_exclude_patterns(settings.exclude_patterns.clone());
        let report = use_case.execute(request).await?;
        if !args.quiet {
            eprintln!("{}", progress_message);
        }
        formatter.format_explanation(&report)?
    };

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&output)
}
