//! Bean 定义读取器实现
//!
//! 支持 TOML、JSON 和 YAML 格式的定义文件，结构相同：
//!
//! ```toml
//! [beans.mailServicePOP]
//! class = "com.study.entity.MailService"
//!
//! [beans.mailServicePOP.properties]
//! port = 110
//! protocol = "POP3"
//!
//! [beans.userService]
//! class = "com.study.service.impl.DefaultUserService"
//!
//! [beans.userService.refs]
//! mailService = "mailServicePOP"
//! ```

use di_abstractions::BeanDefinitionReader;
use indexmap::IndexMap;
use ioc_common::{
    BeanDefinition, BeanDefinitions, ClassNameConventions, DefinitionReadError, DefinitionResult,
    NamingConventions,
};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 定义文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// 根据文件扩展名推断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for DefinitionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// 字面量值，整数统一转换为十进制字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LiteralValue {
    Text(String),
    Integer(i64),
}

impl LiteralValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BeanEntry {
    class: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: IndexMap<String, LiteralValue>,
    #[serde(default)]
    refs: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    #[serde(default)]
    beans: IndexMap<String, BeanEntry>,
}

impl DefinitionFile {
    fn into_definitions(self) -> DefinitionResult<BeanDefinitions> {
        let mut definitions = BeanDefinitions::new();

        for (key, entry) in self.beans {
            if !ClassNameConventions::is_valid_class_name(&entry.class) {
                return Err(DefinitionReadError::InvalidDefinition {
                    key,
                    message: format!("类型名称无效: {:?}", entry.class),
                });
            }

            if let Some(property) = entry
                .properties
                .keys()
                .chain(entry.refs.keys())
                .find(|property| !NamingConventions::is_valid_property_name(property))
            {
                return Err(DefinitionReadError::InvalidDefinition {
                    message: format!("属性名称无效: {:?}", property),
                    key,
                });
            }

            let mut definition =
                BeanDefinition::new(entry.id.unwrap_or_else(|| key.clone()), entry.class);
            definition.set_value_dependencies(
                entry
                    .properties
                    .into_iter()
                    .map(|(property, value)| (property, value.into_string()))
                    .collect(),
            );
            definition.set_ref_dependencies(entry.refs);
            definitions.insert(key, definition);
        }

        Ok(definitions)
    }
}

/// 按指定格式解析定义文本
///
/// `source` 只用于错误信息
pub fn parse_definitions(
    content: &str,
    format: DefinitionFormat,
    source: &str,
) -> DefinitionResult<BeanDefinitions> {
    let parse_error = |e: Box<dyn std::error::Error + Send + Sync>| {
        error!("{} 定义解析失败: {}, 原因: {}", format, source, e);
        DefinitionReadError::Parse {
            path: source.to_string(),
            source: e,
        }
    };

    let file: DefinitionFile = match format {
        DefinitionFormat::Toml => toml::from_str(content).map_err(|e| parse_error(Box::new(e)))?,
        DefinitionFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(Box::new(e)))?
        }
        DefinitionFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| parse_error(Box::new(e)))?
        }
    };

    let definitions = file.into_definitions()?;
    debug!("解析 {} 定义 {}: {} 个 Bean", format, source, definitions.len());
    Ok(definitions)
}

/// 读取文件内容
fn read_file(path: &Path) -> DefinitionResult<String> {
    if !path.exists() {
        error!("定义文件不存在: {}", path.display());
        return Err(DefinitionReadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// 固定格式的定义文件读取器
#[derive(Debug, Clone)]
pub struct FormatDefinitionReader {
    file_path: PathBuf,
    format: DefinitionFormat,
}

impl FormatDefinitionReader {
    /// 创建指定格式的文件读取器
    pub fn new<P: AsRef<Path>>(path: P, format: DefinitionFormat) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// TOML 文件读取器
    pub fn toml<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path, DefinitionFormat::Toml)
    }

    /// JSON 文件读取器
    pub fn json<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path, DefinitionFormat::Json)
    }

    /// YAML 文件读取器
    pub fn yaml<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path, DefinitionFormat::Yaml)
    }

    /// 文件路径
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// 文件格式
    pub fn format(&self) -> DefinitionFormat {
        self.format
    }
}

impl BeanDefinitionReader for FormatDefinitionReader {
    fn read_definitions(&self) -> DefinitionResult<BeanDefinitions> {
        let content = read_file(&self.file_path)?;
        parse_definitions(&content, self.format, &self.file_path.display().to_string())
    }

    fn source_description(&self) -> String {
        format!("{} 文件 {}", self.format, self.file_path.display())
    }
}

/// 按扩展名选择格式的文件读取器
#[derive(Debug, Clone)]
pub struct FileDefinitionReader {
    file_path: PathBuf,
}

impl FileDefinitionReader {
    /// 创建文件读取器
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
        }
    }

    /// 解析出固定格式的读取器
    pub fn resolve(&self) -> DefinitionResult<FormatDefinitionReader> {
        let format = DefinitionFormat::from_path(&self.file_path).ok_or_else(|| {
            DefinitionReadError::UnsupportedFormat {
                path: self.file_path.display().to_string(),
            }
        })?;
        Ok(FormatDefinitionReader::new(&self.file_path, format))
    }
}

impl BeanDefinitionReader for FileDefinitionReader {
    fn read_definitions(&self) -> DefinitionResult<BeanDefinitions> {
        self.resolve()?.read_definitions()
    }

    fn source_description(&self) -> String {
        format!("文件 {}", self.file_path.display())
    }
}

/// 组合读取器
///
/// 按添加顺序合并多个来源，同一个键出现在两个来源中视为错误
#[derive(Default)]
pub struct CompositeDefinitionReader {
    readers: Vec<Box<dyn BeanDefinitionReader>>,
}

impl CompositeDefinitionReader {
    /// 创建空的组合读取器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加读取器
    pub fn add_reader(&mut self, reader: Box<dyn BeanDefinitionReader>) {
        self.readers.push(reader);
    }

    /// 链式添加读取器
    pub fn with_reader<R: BeanDefinitionReader + 'static>(mut self, reader: R) -> Self {
        self.add_reader(Box::new(reader));
        self
    }

    /// 读取器数量
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl BeanDefinitionReader for CompositeDefinitionReader {
    fn read_definitions(&self) -> DefinitionResult<BeanDefinitions> {
        let mut merged = BeanDefinitions::new();

        for reader in &self.readers {
            let definitions = reader.read_definitions()?;
            info!(
                "读取 Bean 定义: {} ({}个)",
                reader.source_description(),
                definitions.len()
            );
            for (key, definition) in definitions {
                if merged.contains_key(&key) {
                    error!("Bean 定义键重复: {} ({})", key, reader.source_description());
                    return Err(DefinitionReadError::DuplicateKey { key });
                }
                merged.insert(key, definition);
            }
        }

        Ok(merged)
    }

    fn source_description(&self) -> String {
        let sources: Vec<String> = self
            .readers
            .iter()
            .map(|reader| reader.source_description())
            .collect();
        format!("组合[{}]", sources.join(", "))
    }
}
