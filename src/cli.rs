use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vinscout_common::insurance::MandatoryLimit;
use vinscout_common::WindowsCoverage;

#[derive(Parser)]
#[command(name = "vinscout")]
#[command(about = "車両書類からVIN・ナンバーを抽出し保険フォームを出力するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 書類を受け付けて抽出・デコードし、JSONを出力
    Process {
        /// 書類ファイルまたはフォルダ（フォルダは直下のみ）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 手動で追加するVIN/ナンバー（複数指定可）
        #[arg(short, long = "manual")]
        manual: Vec<String>,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 未抽出のファイルがあるときの動作 (ask/decode/extract)
        #[arg(long, default_value = "ask")]
        on_unextracted: OnUnextracted,

        /// 抽出を行わずにデコードへ進む
        #[arg(long)]
        skip_extract: bool,

        /// 乱数シード（疑似アップロード・抽出の再現用）
        #[arg(long)]
        seed: Option<u64>,

        /// 進捗の待ち時間を省略
        #[arg(long)]
        fast: bool,

        #[command(flatten)]
        form: FormArgs,
    },

    /// VIN/ナンバーの入力を検証して分類
    Classify {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// 直近の処理のアクティビティログを出力
    Logs {
        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// OCR信頼度のしきい値 (0-10)
        #[arg(long)]
        set_confidence: Option<f32>,

        /// 最大ファイルサイズ (MB)
        #[arg(long)]
        set_max_file_size: Option<u32>,

        /// Tesseract言語データのパス
        #[arg(long)]
        set_tess_data: Option<String>,

        /// 進捗の待ち時間を常に省略
        #[arg(long)]
        set_fast: Option<bool>,
    },
}

/// 保険フォームの入力
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// 契約者のIČO
    #[arg(long)]
    pub ico: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// 保険開始日 (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// 事故保険を付ける
    #[arg(long)]
    pub accident: bool,

    /// 傷害保険を付ける
    #[arg(long)]
    pub injury: bool,

    /// 窓ガラス保険の上限 (0/10/20/30/50/100/no-limit)
    #[arg(long)]
    pub windows: Option<WindowsCoverage>,

    /// 強制保険の上限 (50mil/70mil/100mil/250mil)
    #[arg(long)]
    pub mandatory_limit: Option<MandatoryLimit>,
}

impl FormArgs {
    /// フォームへ反映
    pub fn apply(&self, form: &mut vinscout_common::InsuranceFormData) {
        if let Some(ico) = &self.ico {
            form.policyholder_ico = ico.clone();
        }
        if let Some(email) = &self.email {
            form.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            form.phone = phone.clone();
        }
        if self.start.is_some() {
            form.start_of_insurance = self.start;
        }
        form.coverage.accident_insurance |= self.accident;
        form.coverage.injury_insurance |= self.injury;
        if let Some(windows) = self.windows {
            form.coverage.windows_insurance = windows;
        }
        if let Some(limit) = self.mandatory_limit {
            form.coverage.mandatory_insurance_limit = limit;
        }
    }
}

/// 未抽出のファイルがあるときの動作
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnUnextracted {
    /// 確認する（端末でない場合はそのままデコード）
    #[default]
    Ask,
    /// そのままデコード
    Decode,
    /// 抽出してからデコード
    Extract,
}

impl std::str::FromStr for OnUnextracted {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ask" => Ok(OnUnextracted::Ask),
            "decode" => Ok(OnUnextracted::Decode),
            "extract" => Ok(OnUnextracted::Extract),
            _ => Err(format!("Unknown mode: {}. Use ask, decode, or extract", s)),
        }
    }
}

impl std::fmt::Display for OnUnextracted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnUnextracted::Ask => write!(f, "ask"),
            OnUnextracted::Decode => write!(f, "decode"),
            OnUnextracted::Extract => write!(f, "extract"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use vinscout_common::InsuranceFormData;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "vinscout",
            "process",
            "docs",
            "-m",
            "AB12345",
            "--manual",
            "WBAVA31030NL12345",
            "--on-unextracted",
            "extract",
            "--windows",
            "no-limit",
            "--start",
            "2025-03-01",
        ])
        .expect("パース失敗");

        match cli.command {
            Commands::Process { paths, manual, on_unextracted, form, .. } => {
                assert_eq!(paths, vec![PathBuf::from("docs")]);
                assert_eq!(manual, vec!["AB12345", "WBAVA31030NL12345"]);
                assert_eq!(on_unextracted, OnUnextracted::Extract);
                assert_eq!(form.windows, Some(WindowsCoverage::NoLimit));
                assert_eq!(form.start, NaiveDate::from_ymd_opt(2025, 3, 1));
            }
            _ => panic!("process 以外にパースされた"),
        }
    }

    #[test]
    fn test_invalid_windows_tier() {
        let result = Cli::try_parse_from(["vinscout", "process", "docs", "--windows", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_on_unextracted_from_str() {
        assert_eq!("ASK".parse::<OnUnextracted>(), Ok(OnUnextracted::Ask));
        assert!("later".parse::<OnUnextracted>().is_err());
    }

    #[test]
    fn test_form_args_apply() {
        let args = FormArgs {
            ico: Some("12345678".into()),
            accident: true,
            windows: Some(WindowsCoverage::Limit(30)),
            ..Default::default()
        };
        let mut form = InsuranceFormData::default();
        args.apply(&mut form);

        assert_eq!(form.policyholder_ico, "12345678");
        assert!(form.coverage.accident_insurance);
        assert_eq!(form.coverage.windows_insurance, WindowsCoverage::Limit(30));
        assert!(form.email.is_empty());
    }
}
