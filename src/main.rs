//! postjson - POST HEADER TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use postjson::{
    aggregator::{check_output_mode, convert_directory, list_entries, WriteOptions},
    cli::Args,
    error::PostJsonError,
    pattern::PatternMatcher,
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| PostJsonError::ThreadPoolError {
                reason: e.to_string(),
            })
            .context("스레드 풀 초기화 실패")?;
    }

    // 입력 폴더 확인
    validate_input(&args)?;

    // 패턴 매처 초기화
    let pattern_matcher = PatternMatcher::new(args.pattern.clone())?;

    // 헤더 출력
    print_header(&args, &pattern_matcher);

    // 항목 수집
    let entries = list_entries(&args.input, &pattern_matcher)
        .with_context(|| format!("입력 폴더 목록 조회 실패: {:?}", args.input))?;

    if entries.is_empty() {
        println!("{}", "⚠️ 처리할 파일이 없습니다. 빈 배열을 저장합니다.".yellow());
    } else {
        println!(
            "  {} 발견된 항목 수: {}",
            "📋".bright_white(),
            entries.len().to_string().bright_green()
        );
    }

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&entries);
        return Ok(());
    }

    check_output_mode(&args.output, args.mode)?;

    run_conversion(&args, &pattern_matcher, entries.len());
    Ok(())
}

/// 입력 경로 유효성 검사
fn validate_input(args: &Args) -> Result<()> {
    if !args.input.exists() {
        return Err(PostJsonError::InputNotFound {
            path: args.input.clone(),
        }
        .into());
    }

    if !args.input.is_dir() {
        return Err(PostJsonError::NotADirectory {
            path: args.input.clone(),
        }
        .into());
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, pattern_matcher: &PatternMatcher) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 📝 POST HEADER TO JSON CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.input);

    if !args.dry_run {
        println!("  {} 출력 파일: {:?}", "📄".bright_green(), args.output);
        println!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
    }

    println!("  {} 기준 줄 수: {}", "📏".bright_white(), args.line_count);

    if pattern_matcher.has_pattern() {
        let pattern = pattern_matcher.as_str().unwrap_or_default();
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    } else {
        println!("  {} 패턴 필터: 없음 (모든 항목)", "🔍".bright_magenta());
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    if args.pretty {
        println!(
            "  {} {}",
            "✨".bright_magenta(),
            "Pretty 출력 모드".magenta()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 항목 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(entries: &[PathBuf]) {
    println!("\n{}", "📋 처리 예정 항목 목록:".bright_cyan());
    for (i, path) in entries.iter().enumerate() {
        println!("  {}. {:?}", i + 1, path.file_name().unwrap_or_default());
    }
    println!(
        "\n{} 총 {} 개의 항목이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        entries.len().to_string().bright_green()
    );
}

/// 변환 실행
///
/// 읽기나 쓰기 실패는 화면에 보고만 하고 프로세스는 정상 종료합니다.
fn run_conversion(args: &Args, pattern_matcher: &PatternMatcher, total: usize) {
    let stats = Statistics::new(total);
    let pb = create_progress_bar(total);
    let write_options = WriteOptions {
        mode: args.mode,
        pretty: args.pretty,
    };

    println!("\n{}", "⚡ 병렬 추출 중...".bright_cyan());

    let result = convert_directory(
        &args.input,
        &args.output,
        pattern_matcher,
        &args.extract_options(),
        write_options,
        |extracted| {
            stats.record(extracted);
            pb.inc(1);

            if args.verbose {
                let mark = if extracted.complete {
                    "✓".green()
                } else {
                    "∅".yellow()
                };
                pb.println(format!(
                    "  {} {:?} ({} keys)",
                    mark,
                    extracted.path.file_name().unwrap_or_default(),
                    extracted.record.len()
                ));
            }
        },
    );

    match result {
        Ok(summary) => {
            pb.finish_with_message("완료!");
            stats.add_bytes_written(summary.bytes_written);
            stats.print_summary();
            println!(
                "\n{} 파일이 저장되었습니다 ({} 개 레코드): {:?}\n",
                "✅".bright_green(),
                summary.records,
                args.output
            );
        }
        Err(e) => {
            pb.abandon_with_message("중단");
            report_failure(args, &e);
        }
    }
}

/// 실패 보고 (콘솔 + 선택적 로그 파일)
fn report_failure(args: &Args, error: &PostJsonError) {
    let title = if error.is_read_failure() {
        "❌ 파일 읽기 오류로 변환이 중단되었습니다. 출력 파일은 변경되지 않았습니다."
    } else {
        "❌ 오류 발생:"
    };
    println!("\n{}", title.bright_red());
    println!("  {} {}", "•".red(), error);

    if let Some(ref log_path) = args.log {
        if let Err(log_error) = write_error_log(log_path, error) {
            println!("  {} 에러 로그 저장 실패: {}", "•".red(), log_error);
        }
    }
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, error: &PostJsonError) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("에러 로그 파일 생성 실패: {:?}", log_path))?;

    writeln!(log_file, "postjson 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "{}", "=".repeat(50))?;
    writeln!(log_file, "에러: {}", error)?;

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
