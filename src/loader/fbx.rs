use std::{
    collections::{HashMap, HashSet},
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

use log::warn;

use crate::{
    asset::{AssetInfo, ElementReader, MaterialLibrary},
    element::{FbxElement, FbxProperty, ObjectId, PropertyError, ROOT_OBJECT_ID},
    material::MaterialAsset,
    mesh::MeshAsset,
    node::SceneNode,
};

const OBJECTS_ELEMENT: &str = "Objects";
const CONNECTIONS_ELEMENT: &str = "Connections";
const CONNECTION_ELEMENT: &str = "C";
const OBJECT_LINK: &str = "OO";
const MODEL_ELEMENT: &str = "Model";
const MATERIAL_ELEMENT: &str = "Material";
// Model subtype marking a plain mesh-carrying node. Any other subtype
// (limbs, nulls, cameras) only registers a display name.
const MESH_SUBTYPE: &str = "P";
const MATERIAL_DEF_EXTENSION: &str = "matdef";
const VERTICES_ELEMENT: &str = "Vertices";
const NORMALS_ELEMENT: &str = "Normals";
const UV_ELEMENT: &str = "UV";

#[derive(Debug)]
pub enum LoadError<E> {
    /// The asset was requested without a valid scene key. This is a
    /// loading-contract violation; nothing has been read from the source.
    InvalidKey,
    /// The asset source could not supply the byte stream.
    Stream(E),
    /// The element reader failed on the stream.
    Reader(io::Error),
    /// A referenced material definition template could not be found.
    MaterialDefNotFound(String),
}

impl<E: Display> Display for LoadError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidKey => write!(f, "Missing or invalid scene key"),
            LoadError::Stream(error) => Display::fmt(error, f),
            LoadError::Reader(error) => write!(f, "Failed to read scene elements: {}", error),
            LoadError::MaterialDefNotFound(name) => {
                write!(f, "Material definition {} not found", name)
            }
        }
    }
}

impl<E: Error> Error for LoadError<E> {}

/// Display name of an object: the name property up to the first embedded
/// NUL, which separates the name from a type suffix.
fn display_name(raw: &str) -> &str {
    match raw.find('\0') {
        Some(end) => &raw[..end],
        None => raw,
    }
}

fn collect_stream(element: &FbxElement, name: &str) -> Vec<f32> {
    element
        .children_named(name)
        .flat_map(|child| child.properties.iter())
        .filter_map(FbxProperty::as_f32)
        .collect()
}

fn vertex_streams(element: &FbxElement) -> MeshAsset {
    MeshAsset {
        positions: collect_stream(element, VERTICES_ELEMENT),
        normals: collect_stream(element, NORMALS_ELEMENT),
        tex_coords: collect_stream(element, UV_ELEMENT),
    }
}

#[derive(Debug, Clone)]
pub struct ModelRecord {
    pub id: ObjectId,
    pub name: String,
    pub subtype: String,
    pub mesh: MeshAsset,
}

#[derive(Debug, Clone)]
pub struct MaterialRecord {
    pub id: ObjectId,
    pub name: String,
}

/// Typed object maps built from one scan of the "Objects" elements.
///
/// Record order follows the source file, which keeps resolution
/// deterministic. Elements missing expected properties are skipped, never
/// failing the import.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    models: Vec<ModelRecord>,
    model_ids: HashMap<ObjectId, usize>,
    materials: Vec<MaterialRecord>,
    material_ids: HashMap<ObjectId, usize>,
    node_names: HashMap<ObjectId, String>,
}

impl ObjectRegistry {
    pub fn from_elements(roots: &[FbxElement]) -> Self {
        let mut registry = Self::default();
        for objects in roots.iter().filter(|element| element.name == OBJECTS_ELEMENT) {
            for child in &objects.children {
                let result = match child.name.as_str() {
                    MODEL_ELEMENT => registry.register_model(child),
                    MATERIAL_ELEMENT => registry.register_material(child),
                    _ => Ok(()),
                };
                if let Err(error) = result {
                    warn!("Skipping {} element: {}", child.name, error);
                }
            }
        }
        registry
    }

    fn register_model(&mut self, element: &FbxElement) -> Result<(), PropertyError> {
        let id = element.i64_at(0)?;
        let name = display_name(element.str_at(1)?).to_string();
        let subtype = element.str_at(2)?.to_string();
        if subtype == MESH_SUBTYPE {
            self.model_ids.insert(id, self.models.len());
            self.models.push(ModelRecord {
                id,
                name,
                subtype,
                mesh: vertex_streams(element),
            });
        } else {
            self.node_names.insert(id, name);
        }
        Ok(())
    }

    fn register_material(&mut self, element: &FbxElement) -> Result<(), PropertyError> {
        let id = element.i64_at(0)?;
        let name = display_name(element.str_at(1)?).to_string();
        self.material_ids.insert(id, self.materials.len());
        self.materials.push(MaterialRecord { id, name });
        Ok(())
    }

    pub fn models(&self) -> &[ModelRecord] {
        &self.models
    }

    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    pub fn model(&self, id: ObjectId) -> Option<&ModelRecord> {
        self.model_ids.get(&id).and_then(|index| self.models.get(*index))
    }

    pub fn contains_model(&self, id: ObjectId) -> bool {
        self.model_ids.contains_key(&id)
    }

    pub fn material(&self, id: ObjectId) -> Option<&MaterialRecord> {
        self.material_ids
            .get(&id)
            .and_then(|index| self.materials.get(*index))
    }

    /// Display name of a non-mesh node object.
    pub fn node_name(&self, id: ObjectId) -> Option<&str> {
        self.node_names.get(&id).map(String::as_str)
    }
}

/// Adjacency over "OO" connection records, queryable in both directions.
/// Link order follows the source file.
#[derive(Debug, Default)]
pub struct ConnectionIndex {
    forward: HashMap<ObjectId, Vec<ObjectId>>,
    backward: HashMap<ObjectId, Vec<ObjectId>>,
}

impl ConnectionIndex {
    pub fn from_elements(roots: &[FbxElement]) -> Self {
        let mut index = Self::default();
        for connections in roots
            .iter()
            .filter(|element| element.name == CONNECTIONS_ELEMENT)
        {
            for child in connections.children_named(CONNECTION_ELEMENT) {
                match Self::read_link(child) {
                    Ok(Some((source, target))) => index.record(source, target),
                    Ok(None) => {}
                    Err(error) => warn!("Skipping connection record: {}", error),
                }
            }
        }
        index
    }

    fn read_link(element: &FbxElement) -> Result<Option<(ObjectId, ObjectId)>, PropertyError> {
        if element.str_at(0)? != OBJECT_LINK {
            return Ok(None);
        }
        Ok(Some((element.i64_at(1)?, element.i64_at(2)?)))
    }

    fn record(&mut self, source: ObjectId, target: ObjectId) {
        self.forward.entry(source).or_default().push(target);
        self.backward.entry(target).or_default().push(source);
    }

    /// Targets the source object connects to, in record order.
    pub fn targets(&self, source: ObjectId) -> &[ObjectId] {
        self.forward.get(&source).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sources connecting to the target object, in record order.
    pub fn sources(&self, target: ObjectId) -> &[ObjectId] {
        self.backward.get(&target).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Resolve each mesh model's parent id. The first outgoing link whose
/// target is another registered mesh model wins; an absent, zero or
/// unresolvable target falls back to the scene root.
fn resolve_parents(
    registry: &ObjectRegistry,
    connections: &ConnectionIndex,
) -> HashMap<ObjectId, ObjectId> {
    let mut parents = HashMap::new();
    for model in registry.models() {
        let targets = connections.targets(model.id);
        let parent = match targets
            .iter()
            .copied()
            .find(|target| registry.contains_model(*target))
        {
            Some(parent) => parent,
            None => {
                if !targets.is_empty() && !targets.contains(&ROOT_OBJECT_ID) {
                    warn!(
                        "No resolvable parent for object {}; attaching under scene root",
                        model.id
                    );
                }
                ROOT_OBJECT_ID
            }
        };
        parents.insert(model.id, parent);
    }
    break_cycles(registry, &mut parents);
    parents
}

/// A parent chain that revisits an object is malformed input; the object
/// whose walk detected the cycle is re-attached under the scene root.
fn break_cycles(registry: &ObjectRegistry, parents: &mut HashMap<ObjectId, ObjectId>) {
    for model in registry.models() {
        let mut seen = HashSet::from([model.id]);
        let mut current = parents.get(&model.id).copied().unwrap_or(ROOT_OBJECT_ID);
        while current != ROOT_OBJECT_ID {
            if !seen.insert(current) {
                warn!(
                    "Connection cycle at object {}; attaching under scene root",
                    model.id
                );
                parents.insert(model.id, ROOT_OBJECT_ID);
                break;
            }
            current = parents.get(&current).copied().unwrap_or(ROOT_OBJECT_ID);
        }
    }
}

/// Scene loader resolving an element tree into a node graph.
///
/// The reader, material library and node factory are injected; the loader
/// keeps no state across calls, so one instance can run any number of
/// imports and every import owns a fresh registry and connection index.
pub struct SceneLoader<R, M, F = fn(&str) -> SceneNode> {
    reader: R,
    materials: M,
    node_factory: F,
}

impl<R: ElementReader, M: MaterialLibrary> SceneLoader<R, M> {
    pub fn new(reader: R, materials: M) -> Self {
        Self {
            reader,
            materials,
            node_factory: |name: &str| SceneNode::new(name),
        }
    }
}

impl<R, M, F> SceneLoader<R, M, F>
where
    R: ElementReader,
    M: MaterialLibrary,
    F: FnMut(&str) -> SceneNode,
{
    /// Loader with an injected node factory. A wrapper substituted here
    /// observes every node instantiation.
    pub fn with_node_factory(reader: R, materials: M, node_factory: F) -> Self {
        Self {
            reader,
            materials,
            node_factory,
        }
    }

    /// Import one scene: read the element tree, build the object registry
    /// and connection index, then resolve the node hierarchy and material
    /// bindings. Returns the implicit scene root owning the graph.
    ///
    /// Data irregularities (malformed records, unresolvable connection
    /// targets, cycles) are recovered locally; the returned errors are the
    /// contract and resource failures only, and a failed import never
    /// yields a partial graph.
    pub fn load<A: AssetInfo>(&mut self, info: &mut A) -> Result<SceneNode, LoadError<A::Error>> {
        let key = info.key().ok_or(LoadError::InvalidKey)?;
        let scene_name = format!("{}-scene", key.base_name());
        let def_name = format!("{}.{}", key.name, MATERIAL_DEF_EXTENSION);

        let mut stream = info.open_stream().map_err(LoadError::Stream)?;
        let elements = self.reader.read(&mut stream).map_err(LoadError::Reader)?;
        drop(stream);

        let registry = ObjectRegistry::from_elements(&elements);
        let connections = ConnectionIndex::from_elements(&elements);
        drop(elements);

        let parents = resolve_parents(&registry, &connections);
        let mut materials = self.bind_materials(&registry, &connections, &def_name)?;
        Ok(self.assemble(&scene_name, &registry, &parents, &mut materials))
    }

    fn bind_materials<E>(
        &mut self,
        registry: &ObjectRegistry,
        connections: &ConnectionIndex,
        def_name: &str,
    ) -> Result<HashMap<ObjectId, MaterialAsset>, LoadError<E>> {
        let mut bound = HashMap::new();
        for material in registry.materials() {
            for target in connections.targets(material.id) {
                if !registry.contains_model(*target) {
                    continue;
                }
                let def = self
                    .materials
                    .material_def(def_name)
                    .ok_or_else(|| LoadError::MaterialDefNotFound(def_name.to_string()))?;
                // One material per node; the last record wins.
                bound.insert(
                    *target,
                    MaterialAsset::bind(&def, Some(material.name.clone())),
                );
            }
        }
        Ok(bound)
    }

    fn assemble(
        &mut self,
        scene_name: &str,
        registry: &ObjectRegistry,
        parents: &HashMap<ObjectId, ObjectId>,
        materials: &mut HashMap<ObjectId, MaterialAsset>,
    ) -> SceneNode {
        let mut children: HashMap<ObjectId, Vec<&ModelRecord>> = HashMap::new();
        for model in registry.models() {
            let parent = parents.get(&model.id).copied().unwrap_or(ROOT_OBJECT_ID);
            children.entry(parent).or_default().push(model);
        }

        let mut root = (self.node_factory)(scene_name);
        for record in children
            .get(&ROOT_OBJECT_ID)
            .map(Vec::as_slice)
            .unwrap_or_default()
        {
            let node = self.build_node(record, &children, materials);
            root.children.push(node);
        }
        root
    }

    fn build_node(
        &mut self,
        record: &ModelRecord,
        children: &HashMap<ObjectId, Vec<&ModelRecord>>,
        materials: &mut HashMap<ObjectId, MaterialAsset>,
    ) -> SceneNode {
        let mut node = (self.node_factory)(&record.name);
        if !record.mesh.is_empty() {
            node.mesh = Some(record.mesh.clone());
        }
        node.material = materials.remove(&record.id);
        for child in children
            .get(&record.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
        {
            let child = self.build_node(child, children, materials);
            node.children.push(child);
        }
        node
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Read};

    use super::*;
    use crate::{
        asset::SceneKey,
        material::{MatParam, MatParamValue, MaterialDef},
    };

    struct StubAssetInfo {
        key: Option<SceneKey>,
        fail_stream: bool,
    }

    impl StubAssetInfo {
        fn with_key(name: &str, extension: &str) -> Self {
            Self {
                key: Some(SceneKey::new(name, extension)),
                fail_stream: false,
            }
        }
    }

    impl AssetInfo for StubAssetInfo {
        type Error = io::Error;
        type Stream = io::Empty;

        fn key(&self) -> Option<&SceneKey> {
            self.key.as_ref()
        }

        fn open_stream(&mut self) -> Result<io::Empty, io::Error> {
            if self.fail_stream {
                Err(io::Error::new(io::ErrorKind::NotFound, "stream unavailable"))
            } else {
                Ok(io::empty())
            }
        }
    }

    struct StubReader(Vec<FbxElement>);

    impl ElementReader for StubReader {
        fn read(&mut self, _stream: &mut dyn Read) -> io::Result<Vec<FbxElement>> {
            Ok(self.0.clone())
        }
    }

    struct FailingReader;

    impl ElementReader for FailingReader {
        fn read(&mut self, _stream: &mut dyn Read) -> io::Result<Vec<FbxElement>> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad header"))
        }
    }

    #[derive(Default)]
    struct RecordingLibrary {
        def: Option<MaterialDef>,
        lookups: Vec<String>,
    }

    impl RecordingLibrary {
        fn with_def() -> Self {
            Self {
                def: Some(MaterialDef {
                    name: String::from("Fromage.matdef"),
                    params: vec![MatParam::new(
                        "Diffuse",
                        MatParamValue::Color([1.0, 1.0, 1.0, 1.0]),
                    )],
                }),
                lookups: Vec::new(),
            }
        }
    }

    impl MaterialLibrary for RecordingLibrary {
        fn material_def(&mut self, name: &str) -> Option<MaterialDef> {
            self.lookups.push(name.to_string());
            self.def.clone()
        }
    }

    fn objects(children: Vec<FbxElement>) -> FbxElement {
        FbxElement {
            name: OBJECTS_ELEMENT.into(),
            properties: Vec::new(),
            children,
        }
    }

    fn connections(children: Vec<FbxElement>) -> FbxElement {
        FbxElement {
            name: CONNECTIONS_ELEMENT.into(),
            properties: Vec::new(),
            children,
        }
    }

    fn model(id: i64, name: &str, subtype: &str) -> FbxElement {
        FbxElement {
            name: MODEL_ELEMENT.into(),
            properties: vec![id.into(), name.into(), subtype.into()],
            children: Vec::new(),
        }
    }

    fn material(id: i64, name: &str) -> FbxElement {
        FbxElement {
            name: MATERIAL_ELEMENT.into(),
            properties: vec![id.into(), name.into(), "".into()],
            children: Vec::new(),
        }
    }

    fn link(source: i64, target: i64) -> FbxElement {
        FbxElement {
            name: CONNECTION_ELEMENT.into(),
            properties: vec![OBJECT_LINK.into(), source.into(), target.into()],
            children: Vec::new(),
        }
    }

    fn scene_elements() -> Vec<FbxElement> {
        vec![
            connections(vec![link(100, 200), link(200, 0), link(300, 200)]),
            objects(vec![
                material(100, "abc\0def"),
                model(200, "mesh\0ghi", "P"),
                model(300, "meshChildGetsMaterial\0ghi", "P"),
            ]),
        ]
    }

    fn names_preorder(node: &SceneNode, out: &mut Vec<String>) {
        out.push(node.name.clone());
        for child in &node.children {
            names_preorder(child, out);
        }
    }

    #[test]
    fn load_without_key_is_a_contract_violation() {
        let mut loader = SceneLoader::new(StubReader(Vec::new()), RecordingLibrary::with_def());
        let mut info = StubAssetInfo {
            key: None,
            fail_stream: false,
        };
        match loader.load(&mut info) {
            Err(LoadError::InvalidKey) => {}
            other => panic!("expected InvalidKey, got {:?}", other),
        }
    }

    #[test]
    fn unreadable_stream_is_a_load_failure() {
        let mut loader = SceneLoader::new(StubReader(Vec::new()), RecordingLibrary::with_def());
        let mut info = StubAssetInfo::with_key("Fromage", "chee");
        info.fail_stream = true;
        match loader.load(&mut info) {
            Err(LoadError::Stream(_)) => {}
            other => panic!("expected Stream, got {:?}", other),
        }
    }

    #[test]
    fn failing_reader_is_a_load_failure() {
        let mut loader = SceneLoader::new(FailingReader, RecordingLibrary::with_def());
        let mut info = StubAssetInfo::with_key("Fromage", "chee");
        match loader.load(&mut info) {
            Err(LoadError::Reader(_)) => {}
            other => panic!("expected Reader, got {:?}", other),
        }
    }

    #[test]
    fn load_resolves_hierarchy_and_binds_material() {
        let mut library = RecordingLibrary::with_def();
        let mut created = Vec::new();
        let mut loader = SceneLoader::with_node_factory(
            StubReader(scene_elements()),
            &mut library,
            |name: &str| {
                created.push(name.to_string());
                SceneNode::new(name)
            },
        );
        let mut info = StubAssetInfo::with_key("Fromage", "chee");
        let scene = loader.load(&mut info).unwrap();

        assert_eq!(scene.name, "Fromage-scene");
        let mesh = scene.child("mesh").expect("mesh under scene root");
        let child = mesh
            .child("meshChildGetsMaterial")
            .expect("child under mesh");

        let material = mesh.material.as_ref().expect("material bound to mesh");
        assert_eq!(material.name.as_deref(), Some("abc"));
        assert_eq!(material.definition, "Fromage.matdef");
        assert!(material.parameter("Diffuse").is_some());
        assert!(child.material.is_none());

        drop(loader);
        assert_eq!(library.lookups, vec!["Fromage.matdef"]);
        assert_eq!(
            created,
            vec!["Fromage-scene", "mesh", "meshChildGetsMaterial"]
        );
    }

    #[test]
    fn orphan_mesh_attaches_under_scene_root() {
        let elements = vec![objects(vec![model(200, "mesh", "P")])];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        assert_eq!(scene.name, "scene-scene");
        assert!(scene.child("mesh").is_some());
    }

    #[test]
    fn unresolvable_parent_falls_back_to_scene_root() {
        let elements = vec![
            objects(vec![model(200, "mesh", "P")]),
            connections(vec![link(200, 999)]),
        ];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        assert!(scene.child("mesh").is_some());
    }

    #[test]
    fn connection_cycle_falls_back_to_scene_root() {
        let _ = env_logger::builder().is_test(true).try_init();
        let elements = vec![
            objects(vec![model(200, "a", "P"), model(300, "b", "P")]),
            connections(vec![link(200, 300), link(300, 200)]),
        ];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        let a = scene.child("a").expect("cycle broken at a");
        assert!(a.child("b").is_some());
    }

    #[test]
    fn self_link_falls_back_to_scene_root() {
        let elements = vec![
            objects(vec![model(200, "mesh", "P")]),
            connections(vec![link(200, 200)]),
        ];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        assert!(scene.child("mesh").is_some());
    }

    #[test]
    fn malformed_object_elements_are_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let missing_name = FbxElement {
            name: MODEL_ELEMENT.into(),
            properties: vec![400.into()],
            children: Vec::new(),
        };
        let string_id = FbxElement {
            name: MODEL_ELEMENT.into(),
            properties: vec!["oops".into(), "oops".into(), "P".into()],
            children: Vec::new(),
        };
        let elements = vec![objects(vec![
            missing_name,
            string_id,
            model(200, "mesh", "P"),
        ])];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        assert_eq!(scene.children.len(), 1);
        assert!(scene.child("mesh").is_some());
    }

    #[test]
    fn last_material_record_wins() {
        let mut library = RecordingLibrary::with_def();
        let elements = vec![
            objects(vec![
                material(100, "first"),
                material(101, "second"),
                model(200, "mesh", "P"),
            ]),
            connections(vec![link(100, 200), link(101, 200)]),
        ];
        let mut loader = SceneLoader::new(StubReader(elements), &mut library);
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        let mesh = scene.child("mesh").unwrap();
        let material = mesh.material.as_ref().expect("material bound to mesh");
        assert_eq!(material.name.as_deref(), Some("second"));

        drop(loader);
        assert_eq!(library.lookups.len(), 2);
    }

    #[test]
    fn missing_material_definition_aborts_import() {
        let mut loader =
            SceneLoader::new(StubReader(scene_elements()), RecordingLibrary::default());
        match loader.load(&mut StubAssetInfo::with_key("Fromage", "chee")) {
            Err(LoadError::MaterialDefNotFound(name)) => assert_eq!(name, "Fromage.matdef"),
            other => panic!("expected MaterialDefNotFound, got {:?}", other),
        }
    }

    #[test]
    fn repeated_loads_are_identical() {
        let mut loader =
            SceneLoader::new(StubReader(scene_elements()), RecordingLibrary::with_def());
        let mut info = StubAssetInfo::with_key("Fromage", "chee");
        let first = loader.load(&mut info).unwrap();
        let second = loader.load(&mut info).unwrap();

        let mut first_names = Vec::new();
        let mut second_names = Vec::new();
        names_preorder(&first, &mut first_names);
        names_preorder(&second, &mut second_names);
        assert_eq!(first_names, second_names);
    }

    #[test]
    fn vertex_streams_populate_node_mesh() {
        let mut mesh_model = model(200, "mesh", "P");
        mesh_model.children = vec![
            FbxElement {
                name: VERTICES_ELEMENT.into(),
                properties: vec![1.0.into(), 2.0.into(), 3.0.into()],
                children: Vec::new(),
            },
            FbxElement {
                name: UV_ELEMENT.into(),
                // whole-number coordinates may arrive as integers
                properties: vec![0.25.into(), 1.into()],
                children: Vec::new(),
            },
        ];
        let elements = vec![objects(vec![mesh_model])];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        let mesh = scene
            .child("mesh")
            .and_then(|node| node.mesh.as_ref())
            .expect("vertex streams collected");
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.tex_coords, vec![0.25, 1.0]);
        assert!(mesh.normals.is_empty());
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn non_mesh_model_registers_display_name_only() {
        let elements = vec![objects(vec![
            model(400, "bone\0suffix", "LimbNode"),
            model(200, "mesh", "P"),
        ])];
        let registry = ObjectRegistry::from_elements(&elements);
        assert_eq!(registry.node_name(400), Some("bone"));
        assert!(!registry.contains_model(400));
        assert!(registry.contains_model(200));
        assert!(registry.material(400).is_none());
        assert_eq!(registry.model(200).map(|record| record.name.as_str()), Some("mesh"));

        // A non-mesh target is not a valid parent.
        let elements = vec![
            objects(vec![
                model(400, "bone", "LimbNode"),
                model(200, "mesh", "P"),
            ]),
            connections(vec![link(200, 400)]),
        ];
        let mut loader = SceneLoader::new(StubReader(elements), RecordingLibrary::with_def());
        let scene = loader
            .load(&mut StubAssetInfo::with_key("scene.fbx", "fbx"))
            .unwrap();
        assert!(scene.child("mesh").is_some());
        assert!(scene.child("bone").is_none());
    }

    #[test]
    fn connection_index_is_queryable_both_ways() {
        let elements = vec![connections(vec![
            link(100, 200),
            link(300, 200),
            FbxElement {
                name: CONNECTION_ELEMENT.into(),
                properties: vec!["OP".into(), 100.into(), 200.into()],
                children: Vec::new(),
            },
        ])];
        let index = ConnectionIndex::from_elements(&elements);
        assert_eq!(index.targets(100), &[200]);
        assert_eq!(index.sources(200), &[100, 300]);
        assert!(index.targets(999).is_empty());
        assert!(index.sources(100).is_empty());
    }
}
