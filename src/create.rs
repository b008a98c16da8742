use anyhow::bail;
use console::Style;

use crate::cli::ImageStreamArgs;
use crate::config::Config;
use crate::form::{BuilderImage, FormState, Outcome, INCOMPLETE_FORM};
use crate::imagestream;
use crate::inspect::fetch_image_stream;
use crate::k8s;
use crate::{dryrun, progress, prompt};

/// Values given on the command line for `create`.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub namespace: Option<String>,
    pub tag: Option<String>,
    pub name: Option<String>,
    pub repository: Option<String>,
    pub git_ref: Option<String>,
    pub context_dir: Option<String>,
    pub route: bool,
    pub sample: bool,
    pub dry_run: bool,
    pub json: bool,
    pub interactive: bool,
}

impl CreateOptions {
    /// Without prompts, name and repository must come from flags or the sample.
    fn has_required_fields(&self) -> bool {
        if self.interactive || self.sample {
            return true;
        }
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.name) && present(&self.repository)
    }
}

/// Collect the form, then create the application. Returns false when the
/// form was incomplete or any create request failed.
pub async fn run_create(
    image: &ImageStreamArgs,
    opts: CreateOptions,
    config: &Config,
) -> anyhow::Result<bool> {
    // Incomplete forms fail the same way before and after connecting: exit status 1.
    if !opts.has_required_fields() {
        eprintln!("Error: {INCOMPLETE_FORM}");
        return Ok(false);
    }

    let (client, stream, builder_namespace) = fetch_image_stream(image, config).await?;
    let mut form = FormState::new(
        BuilderImage {
            name: imagestream::stream_name(&stream).to_string(),
            namespace: builder_namespace,
        },
        config.default_ref.clone(),
    );

    if let Some(tag) = &opts.tag {
        form.set_tag(tag.clone());
    }
    form.set_tags(imagestream::require_builder_tags(&stream)?);
    if let Some(tag) = &opts.tag {
        if &form.selected_tag != tag {
            bail!("'{tag}' is not a builder tag of ImageStream {}", form.builder.name);
        }
    }

    if let Some(ns) = &opts.namespace {
        form.set_namespace(ns.clone());
    }
    if let Some(name) = &opts.name {
        form.set_name(name.clone());
    }
    if let Some(repository) = &opts.repository {
        form.set_repository(repository.clone());
    }

    let context_namespace = k8s::default_namespace(client.client());
    if opts.interactive {
        if form.namespace.is_empty() {
            let namespaces = k8s::list_namespaces(client.client()).await;
            form.set_namespace(prompt::choose_namespace(namespaces, &context_namespace)?);
        }
        if opts.tag.is_none() {
            let tag = prompt::choose_tag(&form.tags, &form.selected_tag)?;
            form.set_tag(tag);
        }
    } else if form.namespace.is_empty() {
        form.set_namespace(context_namespace);
    }

    let pb = progress::stage_spinner(&format!(
        "Reading exposed ports of {}:{}",
        form.builder.name, form.selected_tag
    ));
    form.load_ports(&client).await;
    match &form.error {
        Some(e) => progress::fail_spinner(&pb, e),
        None => progress::finish_spinner(&pb, true),
    }

    // clap rejects --sample together with --repository.
    if opts.sample {
        if form.selected().and_then(|t| t.sample_repo.as_ref()).is_none() {
            bail!("Builder tag {} has no sample repository", form.selected_tag);
        }
        form.fill_sample();
    }
    if opts.interactive {
        fill_interactively(&mut form, &opts, config)?;
    } else {
        form.set_create_route(opts.route || config.create_route);
    }
    if let Some(git_ref) = &opts.git_ref {
        form.git_ref = git_ref.clone();
    }
    if let Some(dir) = &opts.context_dir {
        form.context_dir = dir.clone();
    }

    if opts.dry_run {
        if !form.validate() {
            eprintln!("Error: {}", form.error.as_deref().unwrap_or(INCOMPLETE_FORM));
            return Ok(false);
        }
        let plan = form.app_spec().plan(form.create_route);
        let rendered = if opts.json {
            dryrun::render_json(&plan)?
        } else {
            dryrun::render_yaml(&plan)?
        };
        println!("{rendered}");
        return Ok(true);
    }

    let pb = progress::stage_spinner(&format!("Creating {} in {}", form.name, form.namespace));
    let outcome = form.submit(&client).await;
    let Some(outcome) = outcome else {
        progress::fail_spinner(&pb, INCOMPLETE_FORM);
        return Ok(false);
    };
    progress::finish_spinner(&pb, form.error.is_none());

    report(&form, &outcome, config);
    Ok(outcome.navigate_to.is_some())
}

fn fill_interactively(form: &mut FormState, opts: &CreateOptions, config: &Config) -> anyhow::Result<()> {
    if form.name.is_empty() {
        let name = prompt::ask_name(&form.builder.name)?;
        form.set_name(name);
    }
    if form.repository.is_empty() {
        let sample = form.selected().and_then(|t| t.sample_repo.clone());
        match sample {
            Some(repo) if prompt::ask_try_sample(&repo)? => form.fill_sample(),
            _ => {
                let repository = prompt::ask_repository()?;
                form.set_repository(repository);
            }
        }
    }
    // The route question only applies when the builder image exposes ports.
    if !form.ports.is_empty() {
        let route = opts.route || prompt::ask_route(config.create_route)?;
        form.set_create_route(route);
    }
    Ok(())
}

fn report(form: &FormState, outcome: &Outcome, config: &Config) {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();

    for created in &outcome.results {
        match &created.error {
            None => println!("  {} {} {}", green.apply_to("CREATED"), created.kind, form.name),
            Some(e) => println!("  {} {} {}: {}", red.apply_to("FAILED"), created.kind, form.name, e),
        }
    }
    println!();

    match &outcome.navigate_to {
        Some(path) => {
            let target = config.console_link(path).unwrap_or_else(|| path.clone());
            println!("Application {} created in {}.", form.name, form.namespace);
            println!("  View it at: {target}");
            println!("  Follow the build with: oc logs -f bc/{} -n {}", form.name, form.namespace);
        }
        None => {
            eprintln!("Error: {}", form.error.as_deref().unwrap_or("creation failed"));
        }
    }
}
