//! Icon export pipeline.
//!
//! `export_icons` runs each requested format in turn and turns per-format
//! failures into warnings; it only fails when no format produced anything.
//! Within a raster format all sizes are rendered concurrently.

use std::path::Path;

use futures_util::future::join_all;

use crate::domain::{
    AppError, Application, BundleMetadataReader, ExportFormat, ExportResult, ExportedIcon,
    FormatConverter, IconRenderer, Result,
};

use super::inspector::find_container_path;
use super::paths::{app_output_dir, normalize_output_path, sanitize_folder_name};

/// Export `app`'s icon in every requested format below `base_output_path`.
///
/// # Errors
/// Returns [`AppError::ExportFailed`] with all warnings when no format succeeded,
/// or an IO error if the application folder cannot be created.
pub async fn export_icons<T>(
    tools: &T,
    app: &Application,
    sizes: &[u32],
    base_output_path: &str,
    formats: &[ExportFormat],
) -> Result<ExportResult>
where
    T: IconRenderer + FormatConverter + BundleMetadataReader,
{
    let base = normalize_output_path(base_output_path);
    let output_dir = app_output_dir(&app.name, &base);
    create_dir(&output_dir).await?;

    tracing::info!(
        app = %app.name,
        output = %output_dir.display(),
        formats = formats.len(),
        sizes = sizes.len(),
        "Exporting icons"
    );

    let mut results = Vec::new();
    let mut warnings = Vec::new();

    for &format in formats {
        match export_format(tools, app, sizes, &output_dir, format).await {
            Ok(icons) => {
                tracing::debug!(format = %format, files = icons.len(), "Format exported");
                results.extend(icons);
            }
            Err(e) => {
                tracing::warn!(format = %format, error = %e, "Format export failed");
                warnings.push(format!("{}: {e}", format.tag()));
            }
        }
    }

    if results.is_empty() && !warnings.is_empty() {
        return Err(AppError::ExportFailed { warnings });
    }

    Ok(ExportResult {
        output_dir,
        results,
        warnings,
    })
}

/// Export one format into `<app_output_dir>/<TAG>`.
///
/// # Errors
/// Fails on the first size that cannot be rendered or converted, or with
/// [`AppError::ContainerNotFound`] when an ICNS export finds no container.
pub async fn export_format<T>(
    tools: &T,
    app: &Application,
    sizes: &[u32],
    app_output_dir: &Path,
    format: ExportFormat,
) -> Result<Vec<ExportedIcon>>
where
    T: IconRenderer + FormatConverter + BundleMetadataReader,
{
    let format_dir = app_output_dir.join(format.tag());
    create_dir(&format_dir).await?;

    match format {
        ExportFormat::Icns => Ok(vec![export_container(tools, app, &format_dir).await?]),
        ExportFormat::Png | ExportFormat::Jpeg => {
            // Every size runs to completion so each one removes its own intermediate.
            let jobs = sizes
                .iter()
                .map(|&size| export_size(tools, app, &format_dir, size, format));
            join_all(jobs).await.into_iter().collect()
        }
    }
}

/// File name of the rendered PNG for one size.
#[must_use]
pub fn raster_file_name(app_name: &str, size: u32) -> String {
    format!("{}-{size}x{size}.png", sanitize_folder_name(app_name))
}

async fn export_size<T>(
    tools: &T,
    app: &Application,
    format_dir: &Path,
    size: u32,
    format: ExportFormat,
) -> Result<ExportedIcon>
where
    T: IconRenderer + FormatConverter,
{
    let base = format_dir.join(raster_file_name(&app.name, size));

    tools
        .render(&app.path, &base, size)
        .await
        .map_err(|e| AppError::Render {
            app: app.name.clone(),
            size,
            message: e.to_string(),
        })?;

    if format != ExportFormat::Jpeg {
        return Ok(ExportedIcon {
            size,
            file_path: base,
        });
    }

    let target = base.with_extension(format.extension());
    let converted = tools
        .convert(&base, &target, format)
        .await
        .map_err(|e| AppError::Conversion {
            path: base.clone(),
            target: format.tag().to_string(),
            message: e.to_string(),
        });

    remove_intermediate(&base).await;

    converted.map(|()| ExportedIcon {
        size,
        file_path: target,
    })
}

async fn export_container<R: BundleMetadataReader>(
    reader: &R,
    app: &Application,
    format_dir: &Path,
) -> Result<ExportedIcon> {
    let source = find_container_path(reader, &app.path)
        .await
        .ok_or_else(|| AppError::ContainerNotFound {
            app: app.name.clone(),
        })?;

    let target = format_dir.join(format!(
        "{}.{}",
        sanitize_folder_name(&app.name),
        ExportFormat::Icns.extension()
    ));

    tokio::fs::copy(&source, &target).await.map_err(|e| {
        AppError::io(
            format!("Failed to copy {} to {}", source.display(), target.display()),
            e,
        )
    })?;

    Ok(ExportedIcon {
        size: 0,
        file_path: target,
    })
}

async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| AppError::io(format!("Failed to create directory {}", path.display()), e))
}

async fn remove_intermediate(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!(path = %path.display(), error = %e, "Could not remove intermediate file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::inspector::tests::make_bundle;
    use std::collections::HashSet;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// In-memory stand-in for the macOS tools.
    #[derive(Default)]
    struct FakeTools {
        failing_sizes: HashSet<u32>,
        fail_convert: bool,
        slow_convert: bool,
        icon_file: Option<&'static str>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl IconRenderer for FakeTools {
        async fn render(&self, _app_path: &Path, output_path: &Path, size: u32) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;

            let result = if self.failing_sizes.contains(&size) {
                Err(AppError::tool("osascript", "no icon available"))
            } else {
                tokio::fs::write(output_path, format!("png:{size}"))
                    .await
                    .map_err(|e| AppError::io("write", e))
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    impl FormatConverter for FakeTools {
        async fn convert(&self, source: &Path, target: &Path, _format: ExportFormat) -> Result<()> {
            if self.fail_convert {
                return Err(AppError::tool("sips", "unsupported"));
            }
            if self.slow_convert {
                for _ in 0..16 {
                    tokio::task::yield_now().await;
                }
            }
            let data = tokio::fs::read_to_string(source)
                .await
                .map_err(|e| AppError::io("read", e))?;
            tokio::fs::write(target, data.replace("png:", "jpeg:"))
                .await
                .map_err(|e| AppError::io("write", e))
        }
    }

    impl BundleMetadataReader for FakeTools {
        async fn read_key(&self, _plist_path: &Path, _key: &str) -> Result<String> {
            Ok(self.icon_file.unwrap_or_default().to_string())
        }
    }

    fn app_in(dir: &Path, name: &str, icon: Option<&str>) -> Application {
        Application::new(name, make_bundle(dir, name, icon))
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_png_export_returns_one_file_per_size() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "My App", None);
        let tools = FakeTools::default();
        let sizes = [16, 128, 1024];

        let icons = export_format(&tools, &app, &sizes, out.path(), ExportFormat::Png)
            .await
            .unwrap();

        assert_eq!(icons.len(), sizes.len());
        for (icon, size) in icons.iter().zip(sizes) {
            assert_eq!(icon.size, size);
            assert!(icon.file_path.exists());
            assert_eq!(
                icon.file_path,
                out.path().join("PNG").join(format!("My App-{size}x{size}.png"))
            );
        }
    }

    #[tokio::test]
    async fn test_jpeg_export_removes_intermediate_png() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Notes", None);
        let tools = FakeTools::default();

        let icons = export_format(&tools, &app, &[32, 64], out.path(), ExportFormat::Jpeg)
            .await
            .unwrap();

        assert_eq!(icons.len(), 2);
        for icon in &icons {
            assert_eq!(icon.file_path.extension().unwrap(), "jpg");
            assert!(icon.file_path.exists());
            assert!(!icon.file_path.with_extension("png").exists());
        }
        assert_eq!(
            dir_entries(&out.path().join("JPEG")),
            vec!["Notes-32x32.jpg", "Notes-64x64.jpg"]
        );
    }

    #[tokio::test]
    async fn test_failed_conversion_leaves_no_intermediate() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Notes", None);
        let tools = FakeTools {
            fail_convert: true,
            ..Default::default()
        };

        let err = export_format(&tools, &app, &[32], out.path(), ExportFormat::Jpeg)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conversion { .. }));
        assert!(dir_entries(&out.path().join("JPEG")).is_empty());
    }

    #[tokio::test]
    async fn test_render_failure_fails_the_format() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Notes", None);
        let tools = FakeTools {
            failing_sizes: HashSet::from([64]),
            ..Default::default()
        };

        let err = export_format(&tools, &app, &[32, 64], out.path(), ExportFormat::Png)
            .await
            .unwrap_err();

        match err {
            AppError::Render { app, size, .. } => {
                assert_eq!(app, "Notes");
                assert_eq!(size, 64);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_failed_size_does_not_strand_sibling_intermediates() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Notes", None);
        let tools = FakeTools {
            failing_sizes: HashSet::from([64]),
            slow_convert: true,
            ..Default::default()
        };

        let err = export_format(&tools, &app, &[32, 64], out.path(), ExportFormat::Jpeg)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Render { size: 64, .. }));
        let left = dir_entries(&out.path().join("JPEG"));
        assert!(
            left.iter().all(|name| !name.ends_with(".png")),
            "intermediate left: {left:?}"
        );
    }

    #[tokio::test]
    async fn test_icns_export_copies_container() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Calc: Pro", Some("Calc.icns"));
        let tools = FakeTools {
            icon_file: Some("Calc"),
            ..Default::default()
        };

        let icons = export_format(&tools, &app, &[16, 32], out.path(), ExportFormat::Icns)
            .await
            .unwrap();

        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].size, 0);
        assert_eq!(icons[0].file_path, out.path().join("ICNS").join("Calc- Pro.icns"));
        assert_eq!(fs::read(&icons[0].file_path).unwrap(), b"icns");
    }

    #[tokio::test]
    async fn test_icns_missing_container_names_app_and_leaves_no_file() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Safari", None);
        let tools = FakeTools::default();

        let err = export_format(&tools, &app, &[16], out.path(), ExportFormat::Icns)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ContainerNotFound { .. }));
        assert!(err.to_string().contains("Safari"));
        assert!(dir_entries(&out.path().join("ICNS")).is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_returns_warnings() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Safari", None);
        let tools = FakeTools::default();
        let base = out.path().to_string_lossy().into_owned();

        let result = export_icons(
            &tools,
            &app,
            &[16, 32],
            &base,
            &[ExportFormat::Png, ExportFormat::Icns],
        )
        .await
        .unwrap();

        assert_eq!(result.output_dir, out.path().join("Safari App Icons"));
        assert_eq!(result.results.len(), 2);
        assert!(result.results.iter().all(|icon| icon.size > 0));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("ICNS: "));
        assert!(result.warnings[0].contains("Safari"));
    }

    #[tokio::test]
    async fn test_later_formats_run_after_a_failure() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Mail", None);
        let tools = FakeTools::default();
        let base = out.path().to_string_lossy().into_owned();

        let result = export_icons(
            &tools,
            &app,
            &[48],
            &base,
            &[ExportFormat::Icns, ExportFormat::Jpeg],
        )
        .await
        .unwrap();

        assert_eq!(result.results.len(), 1);
        assert_eq!(
            result.results[0].file_path,
            result.output_dir.join("JPEG").join("Mail-48x48.jpg")
        );
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_total_failure_joins_every_warning() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Ghost", None);
        let tools = FakeTools {
            failing_sizes: HashSet::from([16]),
            ..Default::default()
        };
        let base = out.path().to_string_lossy().into_owned();

        let err = export_icons(
            &tools,
            &app,
            &[16],
            &base,
            &[ExportFormat::Png, ExportFormat::Icns],
        )
        .await
        .unwrap_err();

        let AppError::ExportFailed { warnings } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(warnings.len(), 2);
        let message = err.to_string();
        for warning in warnings {
            assert!(message.contains(warning.as_str()));
        }
        assert!(message.contains("PNG: "));
        assert!(message.contains("ICNS: "));
    }

    #[tokio::test]
    async fn test_concurrent_sizes_write_distinct_files() {
        let apps = tempdir().unwrap();
        let out = tempdir().unwrap();
        let app = app_in(apps.path(), "Finder", None);
        let tools = FakeTools::default();
        let sizes = [16, 32, 48, 64, 128, 256, 512, 1024];

        let icons = export_format(&tools, &app, &sizes, out.path(), ExportFormat::Png)
            .await
            .unwrap();

        assert!(tools.max_in_flight.load(Ordering::SeqCst) > 1);

        let paths: HashSet<_> = icons.iter().map(|icon| icon.file_path.clone()).collect();
        assert_eq!(paths.len(), sizes.len());
        for icon in &icons {
            let content = fs::read_to_string(&icon.file_path).unwrap();
            assert_eq!(content, format!("png:{}", icon.size));
        }
    }

    #[test]
    fn test_raster_file_name_is_sanitized() {
        assert_eq!(raster_file_name("A/B", 16), "A-B-16x16.png");
    }
}
