//! Header generation.

use globset::Glob;
use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{conf::Conf, template::expand, Error, Result, DEFAULT_CONF, DEFAULT_PATTERN};

/// Options of a generation run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Project root; relative paths are resolved against it.
    pub root: PathBuf,
    /// Path of the configuration file.
    pub conf: PathBuf,
    /// Template pattern: a literal directory followed by a file name glob.
    pub pattern: String,
    /// Expand templates without writing any files.
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            conf: PathBuf::from(DEFAULT_CONF),
            pattern: DEFAULT_PATTERN.to_string(),
            dry_run: false,
        }
    }
}

/// A generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Template it was generated from.
    pub template: PathBuf,
    /// Path of the generated header.
    pub output: PathBuf,
    /// Number of placeholders replaced.
    pub replacements: usize,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Generated headers in processing order.
    pub generated: Vec<Generated>,
    /// Version substituted into the headers.
    pub version: u32,
    /// Version saved for the next run.
    pub next_version: u32,
}

/// Path of the header generated from a template.
///
/// The inner extension is removed, so `foo.gen.h` becomes `foo.h`.
pub fn output_path(template: &Path) -> Result<PathBuf> {
    let inner = template.file_stem().map(Path::new);
    match (inner.and_then(|s| s.file_stem()), inner.and_then(|s| s.extension()), template.extension()) {
        (Some(stem), Some(_), Some(ext)) => {
            let mut name = OsString::from(stem);
            name.push(".");
            name.push(ext);
            Ok(template.with_file_name(name))
        }
        _ => Err(Error::OutputIsTemplate(template.to_path_buf())),
    }
}

/// Finds all templates in `root` matching `pattern`, sorted by path.
pub fn find_templates(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |reason: &str| Error::InvalidPattern { pattern: pattern.to_string(), reason: reason.to_string() };

    let pattern_path = Path::new(pattern);
    let name = pattern_path.file_name().and_then(|n| n.to_str()).ok_or_else(|| invalid("no file name"))?;
    let dir = pattern_path.parent().unwrap_or_else(|| Path::new(""));
    if dir.to_string_lossy().contains(['*', '?', '[', ']', '{', '}']) {
        return Err(invalid("directory must not contain wildcards"));
    }
    let matcher = Glob::new(name).map_err(|err| invalid(&err.to_string()))?.compile_matcher();

    let dir = root.join(dir);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("template directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(Error::io(&dir)(err)),
    };

    let hidden_ok = name.starts_with('.');
    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(Error::io(&dir))?;
        let file_name = entry.file_name();
        if !hidden_ok && file_name.to_string_lossy().starts_with('.') {
            continue;
        }
        // Follows symlinks.
        if entry.path().is_file() && matcher.is_match(&file_name) {
            templates.push(entry.path());
        }
    }
    templates.sort();

    Ok(templates)
}

/// Generates a header from a template.
fn generate_file(template: &Path, output: PathBuf, conf: &Conf, dry_run: bool) -> Result<Generated> {
    let name = |p: &Path| p.file_name().unwrap_or_default().to_string_lossy().into_owned();

    log::info!("Parsing {}", name(template));
    let text = fs::read_to_string(template).map_err(Error::io(template))?;
    let expansion = expand(&text, conf);
    log::debug!("replaced {} placeholders in {}", expansion.replacements, template.display());

    if dry_run {
        log::info!("Would generate {}", name(&output));
    } else {
        log::info!("Generating {}", name(&output));
        fs::write(&output, expansion.text).map_err(Error::io(&output))?;
        log::info!("Finished writing to {}", name(&output));
    }

    Ok(Generated { template: template.to_path_buf(), output, replacements: expansion.replacements })
}

/// Runs header generation.
///
/// Loads the configuration, generates a header for each template,
/// increments the version and saves the configuration.
pub fn run(opts: &Options) -> Result<Report> {
    let conf_path = opts.root.join(&opts.conf);
    let mut conf = Conf::load(&conf_path)?;
    conf.ensure_version();
    let version = conf.version()?;

    let templates = find_templates(&opts.root, &opts.pattern)?;
    if templates.is_empty() {
        log::warn!("no templates match {}", opts.pattern);
    }

    let outputs = templates.iter().map(|t| output_path(t)).collect::<Result<Vec<_>>>()?;

    let mut generated = Vec::with_capacity(templates.len());
    for (template, output) in templates.iter().zip(outputs) {
        generated.push(generate_file(template, output, &conf, opts.dry_run)?);
    }

    let next_version = conf.bump_version()?;
    if opts.dry_run {
        log::info!("Would save version {next_version} to {}", conf_path.display());
    } else {
        log::info!("Saving new configuration file");
        conf.save(&conf_path)?;
    }

    Ok(Report { generated, version, next_version })
}
