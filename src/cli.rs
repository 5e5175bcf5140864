use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "texture-scan")]
#[command(about = "写真から素材解析レコードを生成しカタログに取り込む", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を解析してカタログに追加
    Analyze {
        /// 画像ファイルまたはフォルダ（フォルダは直下の画像を順に解析）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 品目ラベル（例: "winter scarf"）を指示文に含める
        #[arg(long)]
        hint: Option<String>,

        /// カタログをJSONで出力
        #[arg(long)]
        json: bool,

        /// 解析後にエントリを選択して詳細を表示
        #[arg(long)]
        browse: bool,
    },

    /// 組み込みカタログを表示
    Catalog {
        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// エントリを選択して詳細を表示
        #[arg(long)]
        browse: bool,
    },

    /// 推論サービスに送るレスポンススキーマを表示
    Schema,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
