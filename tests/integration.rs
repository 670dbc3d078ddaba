#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use imgtool::{
        BatchRunner, Command, Dispatcher, ErrorKind, HexColor, ImgToolError, Interrupt, Outcome,
        TransformConfig,
    };
    use std::fs;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Interrupt::new()).with_progress(false)
    }

    fn words(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn magic_isolates_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("in");
        input.create_dir_all().unwrap();

        RgbImage::from_pixel(32, 32, Rgb([255, 255, 255]))
            .save(input.child("a.png").path())
            .unwrap();
        input.child("b.png").write_binary(b"\x00\x01garbage").unwrap();

        let pattern = format!("{}/*.png", input.path().display());
        let output = temp_dir.child("out");
        let output_str = output.path().display().to_string();
        let command = Command::parse_tokens(&words(&[
            "magic", &pattern, &output_str, "16", "#FFFFFF", "0",
        ]))
        .unwrap();

        let summary = match dispatcher().execute(command).unwrap() {
            Outcome::Batch(summary) => summary,
            other => panic!("expected a batch outcome, got {:?}", other),
        };

        assert_eq!(summary.total_matched, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
        assert!(summary.failures[0].path.ends_with("b.png"));
        assert_eq!(summary.failures[0].kind, ErrorKind::DecodeError);

        let result = image::open(output.child("a.png").path()).unwrap();
        assert_eq!(result.dimensions(), (16, 16));
        assert!(result.to_rgba8().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn existing_destination_is_skipped_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]))
            .save(temp_dir.child("icon.png").path())
            .unwrap();

        let output = temp_dir.child("out");
        output.create_dir_all().unwrap();
        output.child("icon.png").write_binary(b"keep me").unwrap();

        let config = TransformConfig {
            target_size: Some(4),
            overwrite: false,
            ..Default::default()
        };
        let pattern = temp_dir.child("icon.png").path().display().to_string();
        let summary = BatchRunner::new(config).run(&[pattern], output.path()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(fs::read(output.child("icon.png").path()).unwrap(), b"keep me");
    }

    #[test]
    fn unmatched_pattern_fails_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/nothing/*.png", temp_dir.path().display());

        assert!(imgtool::expand(&pattern).is_empty());

        let result = BatchRunner::new(TransformConfig::default()).run(&[pattern], temp_dir.path());
        assert!(matches!(result, Err(ImgToolError::NoFilesMatched(_))));
    }

    #[test]
    fn keep_aspect_pads_to_square() {
        let temp_dir = TempDir::new().unwrap();
        RgbImage::from_pixel(60, 20, Rgb([0, 128, 255]))
            .save(temp_dir.child("banner.jpg").path())
            .unwrap();

        let config = TransformConfig {
            target_size: Some(30),
            keep_aspect: true,
            filename_suffix: "_30".to_string(),
            ..Default::default()
        };
        let output = temp_dir.child("out");
        let pattern = temp_dir.child("banner.jpg").path().display().to_string();
        let summary = BatchRunner::new(config).run(&[pattern], output.path()).unwrap();
        assert_eq!(summary.succeeded, 1);

        // Padding forces an alpha-capable format.
        let result = image::open(output.child("banner_30.png").path()).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (30, 30));
        assert_eq!(result.get_pixel(15, 0)[3], 0);
        assert_eq!(result.get_pixel(15, 29)[3], 0);
        assert_eq!(result.get_pixel(15, 15)[3], 255);
    }

    #[test]
    fn resize_only_keeps_the_source_format() {
        let temp_dir = TempDir::new().unwrap();
        RgbImage::from_pixel(50, 10, Rgb([200, 100, 0]))
            .save(temp_dir.child("strip.jpg").path())
            .unwrap();

        let output = temp_dir.child("out");
        let command = Command::parse_tokens(&words(&[
            "resize",
            &temp_dir.child("strip.jpg").path().display().to_string(),
            &output.path().display().to_string(),
            "24",
        ]))
        .unwrap();
        dispatcher().execute(command).unwrap();

        let result = image::open(output.child("strip.jpg").path()).unwrap();
        assert_eq!(result.dimensions(), (24, 24));
    }

    #[test]
    fn remove_color_keeps_size_and_rgb() {
        let temp_dir = TempDir::new().unwrap();
        let mut source = RgbaImage::from_pixel(5, 3, Rgba([255, 0, 255, 255]));
        source.put_pixel(2, 1, Rgba([12, 34, 56, 255]));
        source.save(temp_dir.child("sprite.png").path()).unwrap();

        let output = temp_dir.child("out");
        let command = Command::parse_tokens(&words(&[
            "remove-color",
            &temp_dir.child("sprite.png").path().display().to_string(),
            &output.path().display().to_string(),
            "#F0F",
        ]))
        .unwrap();
        dispatcher().execute(command).unwrap();

        let result = image::open(output.child("sprite.png").path()).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (5, 3));
        assert_eq!(*result.get_pixel(0, 0), Rgba([255, 0, 255, 0]));
        assert_eq!(*result.get_pixel(2, 1), Rgba([12, 34, 56, 255]));
    }

    #[test]
    fn process_color_lists_flatten() {
        let repeated = Command::parse_line(
            "process --input a --output b --remove-color #FF0000 --remove-color #00FF00",
        )
        .unwrap();
        let comma = Command::parse_line("process --input a --output b --remove-color #FF0000,#00FF00")
            .unwrap();
        assert_eq!(repeated, comma);

        match comma {
            Some(Command::Transform(request)) => assert_eq!(
                request.config.colors_to_remove,
                vec![HexColor::new(255, 0, 0), HexColor::new(0, 255, 0)]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_command_is_reported() {
        let result = dispatcher().dispatch("sharpen ./a.png");
        assert!(matches!(result, Err(ImgToolError::UnknownCommand(name)) if name == "sharpen"));
    }

    #[test]
    fn preview_never_fails_on_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let line = format!("preview {}/*.png", temp_dir.path().display());
        assert!(matches!(dispatcher().dispatch(&line), Ok(Outcome::Done)));

        RgbImage::new(3, 7).save(temp_dir.child("tall.png").path()).unwrap();
        let rows = imgtool::commands::preview(&[format!("{}/*.png", temp_dir.path().display())]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dimensions, Some((3, 7)));
    }
}
