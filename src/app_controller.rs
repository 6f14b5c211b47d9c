use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::formatting::{LineClassifier, ValidationConfig, ValidationPass};
use crate::script_analysis::{AnalysisConfig, ScriptAnalyzer};
use crate::script_document::Screenplay;

// @module: Application controller for screenplay processing

/// Tag inserted into output filenames, as in `script.formatted.txt`
const OUTPUT_TAG: &str = "formatted";

/// Name of the per-folder issues log
const ISSUES_LOG_FILENAME: &str = "screenwright.issues.log";

/// Main application controller for screenplay formatting
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self {
            config,
        };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        self.config.page_format.lines_per_page > 0
            && !self.config.formatting.default_time_of_day.trim().is_empty()
    }

    /// Build the line classifier configured for this controller
    fn classifier(&self) -> LineClassifier {
        LineClassifier::new().with_time_of_day(self.config.formatting.default_time_of_day.as_str())
    }

    /// Resolve the configured measurement into a character pitch for
    /// fixed-pitch output
    fn render_pitch(&self) -> u32 {
        self.config.measurement.to_unit().column_pitch()
    }

    /// Run the formatting workflow for one input file
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output_dir, &multi_progress, force_overwrite)
    }

    /// Run the formatting workflow with progress reporting
    fn run_with_progress(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Check if formatted output already exists
        let text_output =
            FileManager::generate_output_path(&input_file, &output_dir, OUTPUT_TAG, "txt");
        let document_output =
            FileManager::generate_output_path(&input_file, &output_dir, OUTPUT_TAG, "json");
        if text_output.exists() && document_output.exists() && !force_overwrite {
            // Skip if output already exists and no force flag
            warn!("Skipping file, formatted output already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Detect file type
        let file_type = FileManager::detect_file_type(&input_file)?;
        if file_type == FileType::Unknown {
            warn!(
                "Could not identify file type, treating as plain script text: {:?}",
                input_file
            );
        }

        let title = Self::title_for(&input_file);
        let mut screenplay = match file_type {
            FileType::Document => {
                info!("Detected saved document, skipping classification");

                let content = FileManager::read_to_string(&input_file)?;
                Screenplay::from_json_str(&content)
                    .with_context(|| format!("Failed to parse document: {:?}", input_file))?
            }
            FileType::PlainText | FileType::Unknown => {
                let content = FileManager::read_to_string(&input_file)?;
                self.classify_with_progress(&title, &content, multi_progress)
            }
        };

        // Record where the document came from
        screenplay = screenplay.with_source_file(&input_file.to_string_lossy());

        info!(
            "🎬 {}: {} elements, {} scenes, {} speeches",
            screenplay.metadata.title,
            screenplay.elements.len(),
            screenplay.scene_count(),
            screenplay.speech_count()
        );

        // Validate the element structure and repair what we can
        let validation_pass = ValidationPass::new(ValidationConfig {
            enable_auto_repair: self.config.formatting.auto_repair,
            default_time_of_day: self.config.formatting.default_time_of_day.clone(),
            ..ValidationConfig::default()
        });

        let report = if self.config.formatting.auto_repair {
            screenplay.validate_and_repair(&validation_pass)
        } else {
            screenplay.validate(&validation_pass)
        };

        info!("{}", report.summary());
        if let Some(repair) = &report.repair_result {
            for action in &repair.actions {
                debug!("Repaired: {}", action.description());
            }
        }
        if !report.passed() {
            for issue in report.critical_issues() {
                warn!("Unresolved: {}", issue.description());
            }
        }

        // Estimate length from the paginated element sequence
        let chars_per_inch = self.render_pitch();
        let pages = screenplay.total_pages(&self.config.page_format, chars_per_inch);
        let minutes = screenplay.estimated_minutes(&self.config.page_format, chars_per_inch);
        info!(
            "Estimated length: {} pages, about {:.0} minutes of screen time",
            pages, minutes
        );

        // Render the formatted text output
        let rendered = screenplay.render_plain(&self.config.page_format, chars_per_inch);
        FileManager::write_to_file(&text_output, &rendered)?;
        info!("Success: {}", text_output.display());

        // Save the typed document alongside it
        let document_json = screenplay
            .to_json_string()
            .context("Failed to serialize document")?;
        FileManager::write_to_file(&document_output, &document_json)?;
        info!("Success: {}", document_output.display());

        info!(
            "Formatting completed in {}.",
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Classify plain script text with a progress bar from the provided MultiProgress
    fn classify_with_progress(
        &self,
        title: &str,
        content: &str,
        multi_progress: &MultiProgress,
    ) -> Screenplay {
        let total_lines = content.lines().count() as u64;
        let progress_bar = multi_progress.add(ProgressBar::new(total_lines));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Classifying");

        let classifier = self.classifier();
        let pb = progress_bar.clone();
        let screenplay = Screenplay::from_plain_text_with_progress(
            title,
            content,
            &classifier,
            self.config.formatting.apply_suffixes,
            move |completed, _total| {
                pb.set_position(completed as u64);
            },
        );

        // Finish and clear the progress bar instead of just finishing it
        // This ensures only the folder progress bar remains visible when
        // processing multiple files
        progress_bar.finish_and_clear();

        screenplay
    }

    /// Run the workflow in folder mode, processing all script files in a directory
    /// Files that already have formatted output will be skipped
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input directory exists
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Find all script files in the directory (recursive)
        let mut script_files = Vec::new();
        for ext in &["txt", "text", "fountain", "screenplay", "script"] {
            let mut files = FileManager::find_files(&input_dir, ext)?;
            script_files.append(&mut files);
        }

        // Leave our own output files alone
        script_files.retain(|path| !Self::is_formatted_output(path));

        // If no script files found, return error
        if script_files.is_empty() {
            return Err(anyhow::anyhow!("No script files found in directory: {:?}", input_dir));
        }

        // Create multi-progress instance for multiple file processing
        let multi_progress = MultiProgress::new();

        // Create a progress bar for folder processing
        let folder_pb = multi_progress.add(ProgressBar::new(script_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        // Track success and failure counts
        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        // Process each script file
        for script_file in script_files.iter() {
            // Get the file name for display
            let file_name = script_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            // Update the folder progress bar to show current file
            folder_pb.set_message(format!("Processing: {}", file_name));

            // Get output directory (use the file's own directory)
            let output_dir = match script_file.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.clone(),
            };

            // Check if formatted output already exists
            let text_output =
                FileManager::generate_output_path(script_file, &output_dir, OUTPUT_TAG, "txt");
            let document_output =
                FileManager::generate_output_path(script_file, &output_dir, OUTPUT_TAG, "json");
            if text_output.exists() && document_output.exists() && !force_overwrite {
                // Skip if output already exists and no force flag
                warn!("Skipping file, formatted output already exists (use -f to force overwrite)");
                skip_count += 1;
                folder_pb.inc(1);
                continue;
            }

            // Run the formatting for this file
            match self.run_with_progress(script_file.clone(), output_dir, &multi_progress, force_overwrite) {
                Ok(_) => {
                    success_count += 1;
                },
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            // Update the folder progress bar
            folder_pb.inc(1);
        }

        // Finish the folder progress bar
        folder_pb.finish_with_message("Folder processing complete");

        // Calculate and display the total elapsed time
        let duration = start_time.elapsed();

        // Give summary results
        let summary_message = format!("Folder processing completed: {} processed, {} skipped, {} errors",
             success_count, skip_count, error_count);
        info!("{}", summary_message);

        // Write summary to log file
        let log_file_path = input_dir.join(ISSUES_LOG_FILENAME);
        let log_line = format!("{} - Duration: {}", summary_message, Self::format_duration(duration));
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder logs to file: {}", e);
        } else {
            info!("Folder processing logs written to {}", log_file_path.display());
        }

        Ok(())
    }

    /// Print statistics for a script or saved document
    pub fn stats(&self, input_file: PathBuf) -> Result<()> {
        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let screenplay = self.load_screenplay(&input_file)?;

        info!("📊 Analyzing: {}", screenplay.metadata.title);

        let analysis_config = AnalysisConfig {
            page_format: self.config.page_format.clone(),
            chars_per_inch: self.render_pitch(),
            ..AnalysisConfig::default()
        };
        let analyzer = ScriptAnalyzer::new(analysis_config);
        let statistics = analyzer.analyze(&screenplay);

        // The report goes to stdout, logs stay on stderr
        println!("{}", statistics);

        Ok(())
    }

    /// Load a screenplay from either a saved document or plain script text
    fn load_screenplay(&self, input_file: &Path) -> Result<Screenplay> {
        let file_type = FileManager::detect_file_type(input_file)?;
        let content = FileManager::read_to_string(input_file)?;

        match file_type {
            FileType::Document => {
                let screenplay = Screenplay::from_json_str(&content)
                    .with_context(|| format!("Failed to parse document: {:?}", input_file))?;
                Ok(screenplay)
            }
            FileType::PlainText | FileType::Unknown => {
                let classifier = self.classifier();
                Ok(Screenplay::from_plain_text_with_progress(
                    &Self::title_for(input_file),
                    &content,
                    &classifier,
                    self.config.formatting.apply_suffixes,
                    |_, _| {},
                ))
            }
        }
    }

    /// Derive a document title from the input file name
    fn title_for(input_file: &Path) -> String {
        input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Check whether a path is one of our own formatted output files
    fn is_formatted_output(path: &Path) -> bool {
        path.file_stem()
            .map(|s| s.to_string_lossy().ends_with(&format!(".{}", OUTPUT_TAG)))
            .unwrap_or(false)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
