//! Bean 定义模型
//!
//! 声明式地描述一个待构建的组件：标识、类型名称、字面量属性和引用属性

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bean 定义
///
/// 加载后只允许工厂后置处理器在扩展阶段修改，之后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDefinition {
    /// 面向人的标识，可以与注册键不同
    pub id: String,
    /// 类型名称，对应已注册的 Bean 类型
    pub class_name: String,
    /// 字面量属性：属性名 -> 字面量字符串
    #[serde(default)]
    pub value_dependencies: IndexMap<String, String>,
    /// 引用属性：属性名 -> 被引用 Bean 的注册键
    #[serde(default)]
    pub ref_dependencies: IndexMap<String, String>,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义
    pub fn new(id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            value_dependencies: IndexMap::new(),
            ref_dependencies: IndexMap::new(),
        }
    }

    /// 添加字面量属性
    pub fn with_value(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.value_dependencies.insert(property.into(), value.into());
        self
    }

    /// 添加引用属性
    pub fn with_ref(mut self, property: impl Into<String>, reference: impl Into<String>) -> Self {
        self.ref_dependencies.insert(property.into(), reference.into());
        self
    }

    /// 设置字面量属性，返回被覆盖的旧值
    pub fn set_value(
        &mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.value_dependencies.insert(property.into(), value.into())
    }

    /// 设置引用属性，返回被覆盖的旧值
    pub fn set_ref(
        &mut self,
        property: impl Into<String>,
        reference: impl Into<String>,
    ) -> Option<String> {
        self.ref_dependencies.insert(property.into(), reference.into())
    }

    /// 整体替换字面量属性
    pub fn set_value_dependencies(&mut self, value_dependencies: IndexMap<String, String>) {
        self.value_dependencies = value_dependencies;
    }

    /// 整体替换引用属性
    pub fn set_ref_dependencies(&mut self, ref_dependencies: IndexMap<String, String>) {
        self.ref_dependencies = ref_dependencies;
    }

    /// 是否声明了任何属性
    pub fn has_dependencies(&self) -> bool {
        !self.value_dependencies.is_empty() || !self.ref_dependencies.is_empty()
    }
}

/// Bean 定义集合
///
/// 以注册键为索引，按插入顺序迭代
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeanDefinitions {
    definitions: IndexMap<String, BeanDefinition>,
}

impl BeanDefinitions {
    /// 创建空的定义集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定键插入定义，返回被替换的旧定义
    pub fn insert(&mut self, key: impl Into<String>, definition: BeanDefinition) -> Option<BeanDefinition> {
        self.definitions.insert(key.into(), definition)
    }

    /// 以定义的 id 作为键插入定义
    pub fn register(&mut self, definition: BeanDefinition) -> Option<BeanDefinition> {
        let key = definition.id.clone();
        self.insert(key, definition)
    }

    /// 链式插入定义
    pub fn with(mut self, key: impl Into<String>, definition: BeanDefinition) -> Self {
        self.insert(key, definition);
        self
    }

    /// 获取定义
    pub fn get(&self, key: &str) -> Option<&BeanDefinition> {
        self.definitions.get(key)
    }

    /// 获取可变定义
    pub fn get_mut(&mut self, key: &str) -> Option<&mut BeanDefinition> {
        self.definitions.get_mut(key)
    }

    /// 移除定义，保持其余定义的顺序
    pub fn remove(&mut self, key: &str) -> Option<BeanDefinition> {
        self.definitions.shift_remove(key)
    }

    /// 是否包含指定键
    pub fn contains_key(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    /// 所有注册键
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.definitions.keys()
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BeanDefinition)> {
        self.definitions.iter()
    }

    /// 按插入顺序可变迭代
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut BeanDefinition)> {
        self.definitions.iter_mut()
    }

    /// 按 id 查找定义（id 不一定等于注册键）
    pub fn find_by_id(&self, id: &str) -> Option<(&String, &BeanDefinition)> {
        self.definitions.iter().find(|(_, definition)| definition.id == id)
    }

    /// 定义数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<(String, BeanDefinition)> for BeanDefinitions {
    fn from_iter<I: IntoIterator<Item = (String, BeanDefinition)>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, BeanDefinition)> for BeanDefinitions {
    fn extend<I: IntoIterator<Item = (String, BeanDefinition)>>(&mut self, iter: I) {
        self.definitions.extend(iter);
    }
}

impl IntoIterator for BeanDefinitions {
    type Item = (String, BeanDefinition);
    type IntoIter = indexmap::map::IntoIter<String, BeanDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.into_iter()
    }
}
