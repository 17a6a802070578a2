use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use walkdir::WalkDir;

use crate::builder::processor::FileProcessor;
use crate::builder::site::output::{mirror_path, rename_leaf};
use crate::builder::site_file::SiteFile;
use crate::utils::error::{SiteError, SiteResult};
use crate::utils::path::{absolute_path, is_excluded_name};

/// Statistics of one generation pass
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerationStats {
    /// Number of files written
    pub files: usize,
    /// Number of directories visited
    pub directories: usize,
    /// Duration of the pass
    pub duration: Duration,
}

/// Transforms the files of an input directory through an ordered chain of
/// [`FileProcessor`]s and writes the results to a mirrored output directory.
///
/// Files and directories whose name starts with `_` are skipped together with
/// everything below them. A failure aborts the pass; files written before the
/// failure are left in place.
pub struct SiteGenerator {
    input_dir: PathBuf,
    output_dir: PathBuf,
    processors: Vec<Box<dyn FileProcessor>>,
}

impl SiteGenerator {
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        SiteGenerator {
            input_dir: absolute_path(input_dir),
            output_dir: absolute_path(output_dir),
            processors: Vec::new(),
        }
    }

    /// Directory from which files are read
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Directory to which files are written
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Append a processor to the end of the chain
    pub fn add_processor<P: FileProcessor + 'static>(&mut self, processor: P) -> &mut Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn with_processor<P: FileProcessor + 'static>(mut self, processor: P) -> Self {
        self.add_processor(processor);
        self
    }

    pub fn processors(&self) -> &[Box<dyn FileProcessor>] {
        &self.processors
    }

    /// Output path of an input path.
    ///
    /// The input root is replaced by the output root, then every processor's
    /// file name transform is applied to the leaf name in registration order,
    /// each receiving the previous result.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let mirrored = mirror_path(&self.input_dir, &self.output_dir, input);
        if mirrored == self.output_dir {
            return mirrored;
        }
        rename_leaf(mirrored, |name| {
            self.processors
                .iter()
                .fold(name, |name, processor| processor.process_output_file_name(&name))
        })
    }

    /// Run one full generation pass
    pub fn generate(&self) -> SiteResult<GenerationStats> {
        self.generate_with(|_| {})
    }

    /// Run one full generation pass, calling `on_each_file` with every file after it was written
    pub fn generate_with<F>(&self, mut on_each_file: F) -> SiteResult<GenerationStats>
    where
        F: FnMut(&SiteFile),
    {
        let start_time = Instant::now();
        let mut stats = GenerationStats::default();

        info!(
            "Generating {} from {}",
            self.output_dir.display(),
            self.input_dir.display()
        );

        let walker = WalkDir::new(&self.input_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_name(entry.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Entries deleted while we walk are skipped
                    if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) {
                        debug!("Skipping vanished entry: {}", err);
                        continue;
                    }
                    let message = err.to_string();
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.input_dir.clone());
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
                    return Err(SiteError::ReadDirectory { path, source });
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.create_output_directory(entry.path())?;
                stats.directories += 1;
            } else if file_type.is_file() {
                let generated = self
                    .generate_file(entry.path())
                    .map_err(|err| err.for_file(entry.path()))?;
                if let Some(file) = generated {
                    stats.files += 1;
                    on_each_file(&file);
                }
            }
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }

    fn create_output_directory(&self, input: &Path) -> SiteResult<()> {
        let output = mirror_path(&self.input_dir, &self.output_dir, input);
        if output.is_dir() {
            return Ok(());
        }

        debug!("Creating output directory {}", output.display());
        fs::create_dir_all(&output).map_err(|source| SiteError::CreateDirectory {
            path: output,
            source,
        })
    }

    /// Read, process and write a single file. Returns `None` if the file vanished before it was read.
    fn generate_file(&self, input: &Path) -> SiteResult<Option<SiteFile>> {
        let content = match fs::read(input) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Skipping vanished file {}", input.display());
                return Ok(None);
            }
            Err(err) => return Err(SiteError::io(input, err)),
        };

        let mut file = SiteFile::new(input, self.output_path_for(input), content);
        for processor in &self.processors {
            processor.process(&mut file)?;
        }

        fs::write(file.output(), file.content()).map_err(|err| SiteError::io(file.output(), err))?;
        debug!("Wrote {}", file.output().display());

        Ok(Some(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::processor::{MetadataProcessor, TemplateNaming};
    use tempfile::TempDir;

    /// Appends a marker to the content and optionally rewrites names
    struct Tag {
        marker: &'static str,
        rename: fn(&str) -> String,
    }

    impl FileProcessor for Tag {
        fn process(&self, file: &mut SiteFile) -> SiteResult<()> {
            let mut content = file.content().to_vec();
            content.extend_from_slice(self.marker.as_bytes());
            file.set_content(content);
            Ok(())
        }

        fn process_output_file_name(&self, name: &str) -> String {
            (self.rename)(name)
        }
    }

    fn identity(name: &str) -> String {
        name.to_string()
    }

    fn lowercase(name: &str) -> String {
        name.to_lowercase()
    }

    fn strip_upper_tmpl(name: &str) -> String {
        name.replace(".TMPL.", ".")
    }

    struct StripTemplateInfix;

    impl FileProcessor for StripTemplateInfix {
        fn process(&self, _file: &mut SiteFile) -> SiteResult<()> {
            Ok(())
        }

        fn process_output_file_name(&self, name: &str) -> String {
            TemplateNaming::default().output_name(name)
        }
    }

    /// Fails on any file named `broken.txt`
    struct FailOnBroken;

    impl FileProcessor for FailOnBroken {
        fn process(&self, file: &mut SiteFile) -> SiteResult<()> {
            if file.input_name() == "broken.txt" {
                return Err(SiteError::Template {
                    path: file.input().to_path_buf(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        fn process_output_file_name(&self, name: &str) -> String {
            name.to_string()
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_generate_mirrors_tree_and_skips_excluded() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "index.html", "home");
        write(input.path(), "blog/post.txt", "post");
        write(input.path(), "blog/_unfinished.txt", "secret");
        write(input.path(), "_drafts/notes.txt", "draft");
        write(input.path(), "_drafts/public/visible.txt", "still excluded");
        fs::create_dir_all(input.path().join("empty")).unwrap();

        let generator = SiteGenerator::new(input.path(), output.path());
        let stats = generator.generate().unwrap();

        assert_eq!(stats.files, 2);
        assert_eq!(stats.directories, 3);
        assert_eq!(fs::read_to_string(output.path().join("index.html")).unwrap(), "home");
        assert_eq!(fs::read_to_string(output.path().join("blog/post.txt")).unwrap(), "post");
        assert!(output.path().join("empty").is_dir());
        assert!(!output.path().join("blog/_unfinished.txt").exists());
        assert!(!output.path().join("_drafts").exists());
    }

    #[test]
    fn test_processors_run_in_registration_order() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "a.txt", "x");

        let generator = SiteGenerator::new(input.path(), output.path())
            .with_processor(Tag { marker: "1", rename: identity })
            .with_processor(Tag { marker: "2", rename: identity });
        generator.generate().unwrap();

        assert_eq!(fs::read_to_string(output.path().join("a.txt")).unwrap(), "x12");
    }

    #[test]
    fn test_output_path_applies_transforms_in_order() {
        let input = Path::new("/site/in");
        let page = Path::new("/site/in/Blog/PAGE.TMPL.HTML");

        let lower_first = SiteGenerator::new(input, "/site/out")
            .with_processor(Tag { marker: "", rename: lowercase })
            .with_processor(Tag { marker: "", rename: strip_upper_tmpl });
        assert_eq!(
            lower_first.output_path_for(page),
            PathBuf::from("/site/out/Blog/page.tmpl.html")
        );

        let strip_first = SiteGenerator::new(input, "/site/out")
            .with_processor(Tag { marker: "", rename: strip_upper_tmpl })
            .with_processor(Tag { marker: "", rename: lowercase });
        assert_eq!(
            strip_first.output_path_for(page),
            PathBuf::from("/site/out/Blog/page.html")
        );
    }

    #[test]
    fn test_output_path_with_identity_processor() {
        let page = Path::new("/site/in/page.tmpl.html");

        let forward = SiteGenerator::new("/site/in", "/site/out")
            .with_processor(MetadataProcessor)
            .with_processor(StripTemplateInfix);
        let reverse = SiteGenerator::new("/site/in", "/site/out")
            .with_processor(StripTemplateInfix)
            .with_processor(MetadataProcessor);

        assert_eq!(forward.output_path_for(page), PathBuf::from("/site/out/page.html"));
        assert_eq!(reverse.output_path_for(page), PathBuf::from("/site/out/page.html"));
    }

    #[test]
    fn test_generate_writes_renamed_files_and_reports_each() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "page.tmpl.html", "page");
        write(input.path(), "style.css", "css");

        let generator = SiteGenerator::new(input.path(), output.path()).with_processor(StripTemplateInfix);
        let mut seen = Vec::new();
        generator
            .generate_with(|file| seen.push(file.output().to_path_buf()))
            .unwrap();

        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&generator.output_dir().join("page.html")));
        assert!(output.path().join("page.html").is_file());
        assert!(!output.path().join("page.tmpl.html").exists());
    }

    #[test]
    fn test_failure_aborts_and_keeps_earlier_output() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "a.txt", "first");
        write(input.path(), "broken.txt", "bad");
        write(input.path(), "z.txt", "last");

        let generator = SiteGenerator::new(input.path(), output.path()).with_processor(FailOnBroken);
        let err = generator.generate().unwrap_err();

        match &err {
            SiteError::File { path, source } => {
                assert!(path.ends_with("broken.txt"));
                assert!(matches!(**source, SiteError::Template { .. }));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("broken.txt"));
        assert!(output.path().join("a.txt").is_file());
        assert!(!output.path().join("z.txt").exists());
    }

    #[test]
    fn test_directory_creation_failure_is_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "blog/post.txt", "post");
        fs::write(output.path().join("blog"), "in the way").unwrap();

        let generator = SiteGenerator::new(input.path(), output.path());
        let err = generator.generate().unwrap_err();

        assert!(matches!(err, SiteError::CreateDirectory { .. }));
    }

    #[test]
    fn test_generate_reprocesses_everything() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "a.txt", "one");

        let generator = SiteGenerator::new(input.path(), output.path());
        generator.generate().unwrap();
        write(input.path(), "a.txt", "two");
        let stats = generator.generate().unwrap();

        assert_eq!(stats.files, 1);
        assert_eq!(fs::read_to_string(output.path().join("a.txt")).unwrap(), "two");
    }
}
