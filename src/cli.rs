use clap::{Args, Parser, Subcommand};


#[derive(Parser, Debug)]
#[command(
    name = "ocp-s2i",
    about = "Create Source-to-Image applications on OpenShift from builder images",
    after_help = "Exit status: 0 on success, 1 when the form is incomplete or a create request fails, \
                  2 on usage, configuration or cluster connection errors."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Config file (default: config/s2i.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ImageStreamArgs {
    /// Builder image stream (e.g. nodejs, python, ruby)
    #[arg(long, short = 'i')]
    pub image_stream: String,

    /// Namespace of the builder image stream (default from config: openshift)
    #[arg(long)]
    pub image_namespace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an application (ImageStream, BuildConfig, DeploymentConfig, Service, Route)
    Create {
        #[command(flatten)]
        image: ImageStreamArgs,

        /// Namespace to create the application in
        #[arg(long, short = 'n')]
        namespace: Option<String>,

        /// Builder image version (default: first builder tag)
        #[arg(long)]
        tag: Option<String>,

        /// Names the resources created for this application
        #[arg(long)]
        name: Option<String>,

        /// Git repository URL. For private repositories, create a source secret first.
        #[arg(long)]
        repository: Option<String>,

        /// Git ref (branch, tag, or commit)
        #[arg(long = "ref")]
        git_ref: Option<String>,

        /// Directory within the repository to build
        #[arg(long)]
        context_dir: Option<String>,

        /// Expose the application at a public URL (only when the image exposes ports)
        #[arg(long)]
        route: bool,

        /// Use the builder tag's sample repository
        #[arg(long, conflicts_with = "repository")]
        sample: bool,

        /// Print the objects that would be created without creating them
        #[arg(long)]
        dry_run: bool,

        /// Print dry-run objects as JSON instead of YAML (requires --dry-run)
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Never prompt; missing values are an error
        #[arg(long)]
        no_input: bool,
    },

    /// List the Source-to-Image builder tags of an image stream
    Tags {
        #[command(flatten)]
        image: ImageStreamArgs,
    },

    /// Show builder image details and exposed ports
    Inspect {
        #[command(flatten)]
        image: ImageStreamArgs,

        /// Builder image version (default: first builder tag)
        #[arg(long)]
        tag: Option<String>,
    },
}
