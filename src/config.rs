use std::path::PathBuf;

/// 文件夹名称中不允许出现的字符
const UNSAFE_PATH_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// 考试名称清洗后为空时使用的目录名
const UNNAMED_EXAM: &str = "未命名考试";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 考试名称（决定输出子目录）
    pub exam_name: String,
    /// 老师账号（追加到考试目录名）
    pub teacher_username: String,
    /// 输出根目录
    pub outputs_dir: String,
    /// 逐页文本输入文件（.txt 以换页符分页，或 .toml）
    pub pages_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_name: String::new(),
            teacher_username: String::new(),
            outputs_dir: "outputs".to_string(),
            pages_path: "in/pages.txt".to_string(),
            verbose_logging: false,
            output_log_file: "extract_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            exam_name: std::env::var("EXAM_NAME").map(|v| v.trim().to_string()).unwrap_or(default.exam_name),
            teacher_username: std::env::var("TEACHER_USERNAME").map(|v| v.trim().to_string()).unwrap_or(default.teacher_username),
            outputs_dir: std::env::var("OUTPUTS_DIR").unwrap_or(default.outputs_dir),
            pages_path: std::env::var("PAGES_PATH").unwrap_or(default.pages_path),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 本次考试的输出目录
    ///
    /// 指定了考试名称时为 `<outputs>/<考试>[_<老师>]`，否则就是输出根目录。
    pub fn output_dir(&self) -> PathBuf {
        let root = PathBuf::from(&self.outputs_dir);
        if self.exam_name.trim().is_empty() {
            return root;
        }

        let mut folder = safe_folder_name(&self.exam_name);
        if folder.is_empty() {
            folder = UNNAMED_EXAM.to_string();
        }

        let teacher = safe_folder_name(&self.teacher_username);
        if !teacher.is_empty() {
            folder = format!("{}_{}", folder, teacher);
        }

        root.join(folder)
    }

    /// 抽取结果表格
    pub fn extract_table_path(&self) -> PathBuf {
        self.output_dir().join("output.csv")
    }

    /// 修复后的表格（从不覆盖抽取结果）
    pub fn processed_table_path(&self) -> PathBuf {
        self.output_dir().join("output_processed.csv")
    }

    /// 交给评分服务的 JSON 记录
    pub fn records_json_path(&self) -> PathBuf {
        self.output_dir().join("output.json")
    }
}

/// 去掉文件夹名称中的非法字符并去除首尾空白
pub fn safe_folder_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !UNSAFE_PATH_CHARS.contains(ch))
        .collect::<String>()
        .trim()
        .to_string()
}
